use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("flatscout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Poll a listings page and print new flats")
        .arg(clap::arg!(--url <URL> "Listings page to poll"))
        .arg(clap::arg!(--file <PATH> "Read a local HTML file (or '-' for stdin) once instead of polling --url"))
        .arg(clap::arg!(--base_url <URL> "Base URL for relative detail links"))
        .arg(
            clap::arg!(--config <FILE> "TOML file overriding the listing markers")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--interval <SECS> "Seconds between poll cycles").default_value("60"))
        .arg(clap::arg!(--once "Run a single cycle and exit"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format for new listings")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Print a shell completion script and exit")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "flatscout", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "flatscout", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "flatscout", &completions_dir).unwrap();
}
