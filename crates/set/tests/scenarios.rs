use tally_registry::{EnumDef, Enumeration, Matches, Member, Value, catalog};
use tally_set::{EnumSet, SetError};

tally_registry::enumeration! {
	Topping {
		CHOCOLATE = "chocolate",
		STRAWBERRY = "strawberry",
		BLACKBERRY = "blackberry",
	}
}

tally_registry::enumeration! {
	Day {
		MONDAY = "monday",
		TUESDAY = "tuesday",
		WEDNESDAY = "wednesday",
		THURSDAY = "thursday",
		FRIDAY = "friday",
		SATURDAY = "saturday",
		SUNDAY = "sunday",
	}
}

struct Country;

impl Enumeration for Country {
	const NAME: &'static str = "Country";

	fn define(def: EnumDef) -> EnumDef {
		def.initializer(|init| {
			init.construct("NETHERLANDS", ["NLD"])?;
			init.construct("IRELAND", ["IRL"])
		})
		.constructor(1, |member, args| {
			if let Some(code) = args.get(0) {
				member.set_value(code.clone());
			}
		})
	}
}

tally_registry::register_enumeration!(Country);

struct Airliner;

impl Enumeration for Airliner {
	const NAME: &'static str = "Airliner";

	fn define(def: EnumDef) -> EnumDef {
		def.initializer(|init| {
			init.construct("RYANAIR", [Value::from("RYR"), Country::resolve("IRELAND")?.into()])?;
			init.construct("KLM", [Value::from("KLM"), Country::resolve("NETHERLANDS")?.into()])?;
			init.construct("TRANSAVIA", [Value::from("TRA"), Country::resolve("NETHERLANDS")?.into()])
		})
		.constructor(2, |member, args| {
			if let Some(country) = args.member(1) {
				member.attach(country);
			}
		})
	}
}

tally_registry::register_enumeration!(Airliner);

fn day(name: &str) -> Member {
	Day::resolve(name).unwrap()
}

#[test]
fn every_lookup_returns_the_same_member() {
	let registry = Topping::registry().unwrap();
	let strawberry = Topping::resolve("STRAWBERRY").unwrap();

	assert_eq!(registry.by_ordinal(1), Some(strawberry));
	assert_eq!(registry.by_value("strawberry"), Some(strawberry));
	assert_eq!(registry.by_binary(2), Matches::Single(strawberry));
	assert_eq!(strawberry.binary(), 2);
	assert_eq!(Topping::get("VANILLA").unwrap(), None);

	let set = EnumSet::by_binary::<Topping>(0b101).unwrap();
	assert_eq!(set.members(), [registry.get("CHOCOLATE").unwrap(), registry.get("BLACKBERRY").unwrap()]);
}

#[test]
fn weekdays_and_weekend() {
	let weekend = EnumSet::of(day("SATURDAY"), day("SUNDAY")).unwrap();
	let weekdays = EnumSet::complement(&weekend);
	let names: Vec<_> = weekdays.iter().map(Member::name).collect();
	assert_eq!(names, ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"]);
	assert_eq!(weekdays.binary(), 31);
	assert_eq!(weekend.binary(), 96);

	let forward = EnumSet::range(day("MONDAY"), day("FRIDAY")).unwrap();
	let backward = EnumSet::range(day("FRIDAY"), day("MONDAY")).unwrap();
	assert_eq!(forward.members(), weekdays.members());
	assert_eq!(backward.members(), weekdays.members());

	let by_name = EnumSet::for_type("Day").unwrap();
	let masked = EnumSet::by_binary_in(by_name.registry(), 96);
	assert!(masked.same_members(&weekend));
	assert!(EnumSet::all::<Day>().unwrap().contains((&weekend, &weekdays)));
}

#[test]
fn jogging_schedule_with_a_park_rota() {
	let mut jogging = EnumSet::create::<Day>().unwrap();
	jogging.add((day("MONDAY"), [day("WEDNESDAY"), day("FRIDAY")], day("SUNDAY")));
	jogging.remove(day("WEDNESDAY"));

	let park_open = EnumSet::range(day("THURSDAY"), day("SUNDAY")).unwrap();
	jogging.retain(&park_open).unwrap();

	assert_eq!(jogging.members(), [day("FRIDAY"), day("SUNDAY")]);
	assert_eq!(jogging.binary(), 16 | 64);
	assert!(!jogging.contains(day("MONDAY")));
}

#[test]
fn unknown_type_names_are_rejected() {
	assert_eq!(
		EnumSet::for_type("Nope").unwrap_err(),
		SetError::InvalidType { name: "Nope".into() }
	);
	assert!(catalog::find("Topping").is_some());
}

#[test]
fn members_carry_constructor_data_across_types() {
	let dutch = EnumSet::all::<Airliner>()
		.unwrap()
		.iter()
		.filter(|airliner| {
			airliner.data::<Member>().and_then(|country| country.value()) == Some(&Value::from("NLD"))
		})
		.map(Member::name)
		.collect::<Vec<_>>();
	assert_eq!(dutch, ["KLM", "TRANSAVIA"]);

	let countries = catalog::all_members();
	let kind = Country::registry().unwrap().kind();
	assert_eq!(countries[&kind].len(), 2);
}
