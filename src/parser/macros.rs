use super::ParserInfo;
use envspec_core::Parser;

/// Internal registration structure used by the macro.
#[doc(hidden)]
pub struct ParserRegistration {
    pub info: ParserInfo,
    pub factory: fn() -> Parser,
}

/// Distributed slice that collects all parser registrations.
#[doc(hidden)]
#[linkme::distributed_slice]
pub static PARSER_REGISTRY: [ParserRegistration];

/// Declarative macro for registering parsers.
///
/// # Usage
///
/// ```ignore
/// register_parser! {
///     name: "port",
///     description: "TCP/UDP port between 1 and 65535",
///     examples: ["8080", "443"],
///     factory: envspec_core::parsers::port,
/// }
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! register_parser {
    (
        name: $name:expr,
        description: $description:expr,
        examples: [$($example:expr),* $(,)?],
        factory: $factory:path $(,)?
    ) => {
        const _: () = {
            #[linkme::distributed_slice($crate::parser::PARSER_REGISTRY)]
            #[doc(hidden)]
            static PARSER_REGISTRATION: $crate::parser::ParserRegistration = $crate::parser::ParserRegistration {
                info: $crate::parser::ParserInfo {
                    name: $name,
                    description: $description,
                    examples: &[$($example,)*],
                },
                factory: $factory,
            };
        };
    };
}
