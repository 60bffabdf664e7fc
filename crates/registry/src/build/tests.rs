use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::{DuplicatePolicy, EnumDef, EnumError, Enumeration, Value};

/// Structured fields of one event, message excluded.
#[derive(Default)]
struct Fields(Vec<String>);

impl Visit for Fields {
	fn record_str(&mut self, field: &Field, value: &str) {
		self.0.push(format!("{}={value}", field.name()));
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() != "message" {
			self.0.push(format!("{}={value:?}", field.name()));
		}
	}
}

/// Layer collecting the fields of every WARN event.
#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for Warnings {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if *event.metadata().level() == Level::WARN {
			let mut fields = Fields::default();
			event.record(&mut fields);
			self.0.lock().push(fields.0.join(" "));
		}
	}
}

struct Planet;

#[derive(Debug, PartialEq)]
struct PlanetInfo {
	inhabitant: String,
	related: String,
}

impl Enumeration for Planet {
	const NAME: &'static str = "Planet";

	fn define(def: EnumDef) -> EnumDef {
		def.constant("MERCURY", 1)
			.constant("VENUS", 2)
			.constant("EARTH", 3)
			.constant("MARS", 4)
			.constant("PLUTO", 9)
			.initializer(|init| {
				init.construct("MERCURY", ["Mercurian", "Chemical element"])?;
				init.construct("VENUS", ["Venusian", "Roman goddess of love"])?;
				init.construct("EARTH", ["Terrestrial", "Soil we walk on"])?;
				init.construct("MARS", ["Martian", "Well-known candy bar"])?;
				init.construct("PLUTO", ["Plutonian", "Fictional Disney character"])
			})
			.constructor(2, |member, args| {
				member.attach(PlanetInfo {
					inhabitant: args.str(0).unwrap_or_default().to_owned(),
					related: args.str(1).unwrap_or_default().to_owned(),
				});
			})
	}
}

struct Country;

impl Enumeration for Country {
	const NAME: &'static str = "Country";

	fn define(def: EnumDef) -> EnumDef {
		def.initializer(|init| {
			init.construct("NETHERLANDS", ["NLD"])?;
			init.construct("NORWAY", ["NOR"])?;
			init.construct("IRELAND", ["IRL"])
		})
		.constructor(1, |member, args| {
			if let Some(code) = args.get(0) {
				member.set_value(code.clone());
			}
		})
	}
}

struct Airliner;

struct Carrier {
	code: String,
	country: crate::Member,
}

impl Enumeration for Airliner {
	const NAME: &'static str = "Airliner";

	fn define(def: EnumDef) -> EnumDef {
		def.initializer(|init| {
			init.construct(
				"RYANAIR",
				[Value::from("RYR"), Country::resolve("IRELAND")?.into()],
			)?;
			init.construct(
				"KLM",
				[Value::from("KLM"), Country::resolve("NETHERLANDS")?.into()],
			)
		})
		.constructor(2, |member, args| {
			if let (Some(code), Some(country)) = (args.str(0), args.member(1)) {
				member.attach(Carrier {
					code: code.to_owned(),
					country,
				});
			}
		})
	}
}

#[test]
fn constants_pool_in_declaration_order() {
	let registry = Planet::registry().unwrap();
	let names: Vec<_> = registry.names().collect();
	assert_eq!(names, ["MERCURY", "VENUS", "EARTH", "MARS", "PLUTO"]);
	for (i, member) in registry.members().enumerate() {
		assert_eq!(member.ordinal() as usize, i);
		assert_eq!(member.binary(), 1 << i);
	}
	assert_eq!(registry.get("PLUTO").unwrap().value(), Some(&Value::Int(9)));
}

#[test]
fn constructor_attaches_initializer_arguments() {
	let venus = Planet::resolve("VENUS").unwrap();
	assert_eq!(
		venus.data::<PlanetInfo>(),
		Some(&PlanetInfo {
			inhabitant: "Venusian".into(),
			related: "Roman goddess of love".into(),
		})
	);
	assert_eq!(venus.data::<String>(), None);
	assert_eq!(venus.ordinal(), 1);
}

#[test]
fn initializer_only_type_gets_values_from_constructor() {
	let registry = Country::registry().unwrap();
	assert_eq!(registry.len(), 3);
	let norway = registry.by_value("NOR").unwrap();
	assert_eq!(norway.name(), "NORWAY");
	assert_eq!(norway.ordinal(), 1);
	assert!(registry.by_value("SWE").is_none());
}

#[test]
fn constructor_arguments_may_reference_other_types() {
	let ryanair = Airliner::resolve("RYANAIR").unwrap();
	let carrier = ryanair.data::<Carrier>().unwrap();
	assert_eq!(carrier.code, "RYR");
	assert_eq!(carrier.country, Country::resolve("IRELAND").unwrap());
	assert!(carrier.country.is::<Country>());
}

struct Shared;

impl Enumeration for Shared {
	const NAME: &'static str = "Shared";

	fn define(def: EnumDef) -> EnumDef {
		def.constant("ALPHA", "a")
			.constant("BETA", "b")
			.initializer(|init| {
				init.construct("BETA", ["beta-arg"])?;
				init.declare("BETA");
				init.construct("BETA", Vec::<Value>::new())?;
				init.declare("GAMMA");
				Ok(())
			})
			.constructor(1, |member, args| {
				member.attach(args.str(0).map(str::to_owned));
			})
	}
}

#[test]
fn initializer_arguments_combine_with_plain_constant() {
	let registry = Shared::registry().unwrap();
	let beta = registry.get("BETA").unwrap();
	assert_eq!(beta.ordinal(), 1);
	assert_eq!(beta.value(), Some(&Value::from("b")));
	assert_eq!(beta.data::<Option<String>>(), Some(&Some("beta-arg".to_owned())));

	let gamma = registry.get("GAMMA").unwrap();
	assert_eq!(gamma.ordinal(), 2);
	assert_eq!(gamma.value(), None);
	assert_eq!(gamma.data::<Option<String>>(), Some(&None));
}

struct Twice;

impl Enumeration for Twice {
	const NAME: &'static str = "Twice";

	fn define(def: EnumDef) -> EnumDef {
		def.constant("ONE", 1).initializer(|init| {
			init.construct("ONE", ["first"])?;
			init.construct("ONE", ["second"])
		})
	}
}

#[test]
fn second_argument_supply_fails_the_build() {
	let expected = EnumError::DuplicateArguments {
		ty: "Twice",
		name: "ONE".into(),
	};
	assert_eq!(Twice::registry().unwrap_err(), expected);
	// Failed builds are not cached.
	assert_eq!(Twice::get("ONE").unwrap_err(), expected);
}

struct Sparse;

impl Enumeration for Sparse {
	const NAME: &'static str = "Sparse";

	fn define(def: EnumDef) -> EnumDef {
		def.member("FULL")
			.member("PARTIAL")
			.member("NONE")
			.initializer(|init| {
				init.construct("FULL", [1, 2, 3])?;
				init.construct("PARTIAL", [1])
			})
			.constructor(3, |member, args| {
				let present = args.iter().filter(Option::is_some).count();
				member.attach((args.len(), present));
			})
	}
}

#[test]
fn missing_arguments_are_padded_and_warned() {
	let warnings = Warnings::default();
	let subscriber = tracing_subscriber::registry().with(warnings.clone());
	let registry = tracing::subscriber::with_default(subscriber, Sparse::registry).unwrap();

	assert_eq!(
		*warnings.0.lock(),
		[
			"ty=Sparse member=PARTIAL missing=2 required=3 supplied=1",
			"ty=Sparse member=NONE missing=1 required=3 supplied=0",
		]
	);

	let shape = |name| *registry.get(name).unwrap().data::<(usize, usize)>().unwrap();
	assert_eq!(shape("FULL"), (3, 3));
	assert_eq!(shape("PARTIAL"), (3, 1));
	assert_eq!(shape("NONE"), (3, 0));
}

struct Strict;

impl Enumeration for Strict {
	const NAME: &'static str = "Strict";

	fn define(def: EnumDef) -> EnumDef {
		def.duplicate_policy(DuplicatePolicy::Reject)
			.constant("A", 1)
			.constant("A", 2)
	}
}

struct Lenient;

impl Enumeration for Lenient {
	const NAME: &'static str = "Lenient";

	fn define(def: EnumDef) -> EnumDef {
		def.constant("A", 1).constant("B", 2).constant("A", 3)
	}
}

#[test]
fn duplicate_constants_follow_policy() {
	assert_eq!(
		Strict::registry().unwrap_err(),
		EnumError::DuplicateConstant {
			ty: "Strict",
			name: "A".into(),
		}
	);

	let registry = Lenient::registry().unwrap();
	assert_eq!(registry.len(), 2);
	assert_eq!(registry.get("A").unwrap().value(), Some(&Value::Int(1)));
	assert_eq!(registry.get("B").unwrap().ordinal(), 1);
}

struct Assigned;

impl Enumeration for Assigned {
	const NAME: &'static str = "Assigned";

	fn define(def: EnumDef) -> EnumDef {
		def.initializer(|init| {
			assert!(init.is_empty());
			init.declare("RED");
			init.assign("RED", 0xff0000)?;
			assert!(init.is_declared("RED"));
			assert_eq!(init.kind().name(), "Assigned");
			init.assign("GREEN", 0x00ff00)
		})
	}
}

#[test]
fn assigning_an_undeclared_name_fails() {
	assert_eq!(
		Assigned::registry().unwrap_err(),
		EnumError::UndeclaredMember {
			ty: "Assigned",
			name: "GREEN".into(),
		}
	);
}
