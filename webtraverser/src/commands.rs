use crate::CLAP_STYLING;
use clap::{arg, value_parser};
use webtraverser_core::output::DEFAULT_OUTPUT;
use webtraverser_core::render::DEFAULT_RENDERER;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("webtraverser")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("webtraverser")
        .about("Generate graph of webpage links")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-u --"url" <URL>)
                .required(true)
                .help("Webpage URL to start from"),
        )
        .arg(
            arg!(--"user-agent" <USER_AGENT>)
                .visible_alias("ua")
                .required(false)
                .help("User-Agent header")
                .default_value("webtraverser"),
        )
        .arg(
            arg!(-d --"max-depth" <DEPTH>)
                .required(false)
                .help("Maximum graph depth allowed")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Output file. Valid extensions: svg, dot, json. Use special value '-' to print to stdout")
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(--"renderer" <PROGRAM>)
                .required(false)
                .help("Graphviz executable used for svg output")
                .default_value(DEFAULT_RENDERER),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log debug information to stderr").required(false))
}
