//! Entry point for the `pubcrawl` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = pubcrawl_cli::run() {
        #[expect(clippy::print_stderr, reason = "the binary reports fatal errors")]
        {
            eprintln!("pubcrawl: {err}");
        }
        std::process::exit(1);
    }
}
