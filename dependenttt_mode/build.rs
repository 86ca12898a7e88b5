// build.rs - compile-time limits from config/<profile>.toml
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

#[derive(serde::Deserialize)]
struct Limits {
    file_processing: FileProcessingLimits,
    highlighting: HighlightingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
}

#[derive(serde::Deserialize)]
struct HighlightingLimits {
    max_document_lines: usize,
    max_highlight_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

const HARD_MAX_FILE_SIZE: u64 = 1_000_000_000;
const HARD_MAX_DOCUMENT_LINES: usize = 10_000_000;
const PRODUCTION_MAX_FILE_SIZE: u64 = 50_000_000;

fn main() {
    for var in ["DTT_BUILD_PROFILE", "DTT_CONFIG_DIR"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    println!("cargo:rerun-if-changed=build.rs");

    let profile = env::var("DTT_BUILD_PROFILE").unwrap_or_else(|_| "development".into());
    let config_dir = env::var("DTT_CONFIG_DIR").unwrap_or_else(|_| "config".into());

    // Profiles live next to the workspace manifest
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace_root = crate_dir
        .parent()
        .expect("crate must live inside the workspace");
    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));
    println!("cargo:rerun-if-changed={}", config_path.display());

    let text = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "cannot read limits for profile '{}' at {}: {}",
            profile,
            config_path.display(),
            e
        )
    });
    let limits: Limits = toml::from_str(&text)
        .unwrap_or_else(|e| panic!("invalid limits in {}: {}", config_path.display(), e));

    let problems = check(&limits, &profile);
    if !problems.is_empty() {
        panic!(
            "{} rejected:\n  - {}",
            config_path.display(),
            problems.join("\n  - ")
        );
    }

    let out = PathBuf::from(env::var("OUT_DIR").unwrap()).join("constants.rs");
    fs::write(out, render(&limits, &profile)).unwrap();
}

fn check(limits: &Limits, profile: &str) -> Vec<String> {
    let mut problems = Vec::new();
    let max_file_size = limits.file_processing.max_file_size;

    if max_file_size == 0 || max_file_size > HARD_MAX_FILE_SIZE {
        problems.push(format!(
            "file_processing.max_file_size must be in 1..={}",
            HARD_MAX_FILE_SIZE
        ));
    }
    if profile == "production" && max_file_size > PRODUCTION_MAX_FILE_SIZE {
        problems.push(format!(
            "file_processing.max_file_size above {} is not allowed in production",
            PRODUCTION_MAX_FILE_SIZE
        ));
    }
    if limits.highlighting.max_document_lines == 0
        || limits.highlighting.max_document_lines > HARD_MAX_DOCUMENT_LINES
    {
        problems.push(format!(
            "highlighting.max_document_lines must be in 1..={}",
            HARD_MAX_DOCUMENT_LINES
        ));
    }
    if limits.highlighting.max_highlight_length == 0 {
        problems.push("highlighting.max_highlight_length must be positive".into());
    }
    if !(100..=100_000).contains(&limits.logging.log_buffer_size) {
        problems.push("logging.log_buffer_size must be in 100..=100000".into());
    }
    if limits.logging.max_log_message_length == 0 {
        problems.push("logging.max_log_message_length must be positive".into());
    }
    if limits.logging.security_min_log_level > 2 {
        problems.push("logging.security_min_log_level must be 0, 1 or 2".into());
    }

    problems
}

fn render(limits: &Limits, profile: &str) -> String {
    let sections: [(&str, Vec<(&str, &str, String)>); 3] = [
        (
            "file_processing",
            vec![(
                "MAX_FILE_SIZE",
                "u64",
                limits.file_processing.max_file_size.to_string(),
            )],
        ),
        (
            "highlighting",
            vec![
                (
                    "MAX_DOCUMENT_LINES",
                    "usize",
                    limits.highlighting.max_document_lines.to_string(),
                ),
                (
                    "MAX_HIGHLIGHT_LENGTH",
                    "usize",
                    limits.highlighting.max_highlight_length.to_string(),
                ),
            ],
        ),
        (
            "logging",
            vec![
                (
                    "LOG_BUFFER_SIZE",
                    "usize",
                    limits.logging.log_buffer_size.to_string(),
                ),
                (
                    "MAX_LOG_MESSAGE_LENGTH",
                    "usize",
                    limits.logging.max_log_message_length.to_string(),
                ),
                (
                    "SECURITY_MIN_LOG_LEVEL",
                    "u8",
                    limits.logging.security_min_log_level.to_string(),
                ),
            ],
        ),
    ];

    let mut code = format!("// Generated by build.rs from the '{}' profile\n", profile);
    code.push_str("pub mod compile_time {\n");
    for (module, constants) in &sections {
        let _ = writeln!(code, "    pub mod {} {{", module);
        for (name, ty, value) in constants {
            let _ = writeln!(code, "        pub const {}: {} = {};", name, ty, value);
        }
        code.push_str("    }\n");
    }
    code.push_str("}\n");
    code
}
