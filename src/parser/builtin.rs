use envspec_core::parsers;

crate::register_parser! {
    name: "string",
    description: "The raw value, unchanged",
    examples: ["hello"],
    factory: parsers::string,
}

crate::register_parser! {
    name: "int",
    description: "Signed 64-bit integer",
    examples: ["42", "-1"],
    factory: parsers::int,
}

crate::register_parser! {
    name: "float",
    description: "Finite floating point number",
    examples: ["0.5", "1e3"],
    factory: parsers::float,
}

crate::register_parser! {
    name: "bool",
    description: "true/false, 1/0, yes/no or on/off",
    examples: ["true", "off"],
    factory: parsers::boolean,
}

crate::register_parser! {
    name: "port",
    description: "TCP/UDP port between 1 and 65535",
    examples: ["8080", "443"],
    factory: parsers::port,
}

crate::register_parser! {
    name: "url",
    description: "Absolute URL",
    examples: ["https://example.com", "postgres://user:pass@db:5432/app"],
    factory: parsers::url,
}

crate::register_parser! {
    name: "json",
    description: "JSON document",
    examples: ["{\"replicas\": 3}", "[1, 2]"],
    factory: parsers::json,
}

crate::register_parser! {
    name: "list",
    description: "Comma separated list",
    examples: ["a,b,c"],
    factory: parsers::list,
}
