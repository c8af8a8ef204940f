pub mod crawl;
pub mod dot;
pub mod error;
pub mod output;
pub mod render;

pub use error::OutputError;

pub fn print_banner() {
    eprintln!(
        "webtraverser v{} - generate a graph of webpage links\n",
        env!("CARGO_PKG_VERSION")
    );
}
