#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_import;
    use crate::cli::{Cli, Command, FormatArg};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_import_valid() {
        let spec = parse_import("preact=h,render").unwrap();
        assert_eq!(spec.package, "preact");
        assert_eq!(spec.exports, vec!["h", "render"]);

        let spec = parse_import("@preact/signals= signal , computed,").unwrap();
        assert_eq!(spec.package, "@preact/signals");
        assert_eq!(spec.exports, vec!["signal", "computed"]);
    }

    #[test]
    fn test_parse_import_invalid() {
        assert!(parse_import("preact").is_err());
        assert!(parse_import("=h").is_err());
        assert!(parse_import("preact=").is_err());
        assert!(parse_import("preact= , ").is_err());
    }

    #[test]
    fn test_build_command_defaults() {
        let cli = Cli::try_parse_from(["standalone-preact", "build"]).unwrap();
        match cli.command {
            Command::Build(args) => {
                assert!(args.imports.is_empty());
                assert_eq!(args.format, None);
                assert_eq!(args.out_dir, None);
                assert!(!args.stdout);
                assert!(!args.usage);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_build_command_with_imports() {
        let cli = Cli::try_parse_from([
            "standalone-preact",
            "build",
            "--import",
            "preact=h,render",
            "-i",
            "htm=htm",
            "--format",
            "global",
            "--out-dir",
            "out",
        ])
        .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.imports.len(), 2);
                assert_eq!(args.imports[1].package, "htm");
                assert_eq!(args.format, Some(FormatArg::Iife));
                assert_eq!(args.out_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_stdout_conflicts_with_out_dir() {
        let result = Cli::try_parse_from([
            "standalone-preact",
            "build",
            "--stdout",
            "--out-dir",
            "dist",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_import_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["standalone-preact", "build", "--import", "preact"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "standalone-preact",
            "serve",
            "--port",
            "8080",
            "--registry",
            "snap.json",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.registry, Some(PathBuf::from("snap.json")));
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.host, None);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["standalone-preact", "-v", "-q", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_defaults() {
        let cli = Cli::try_parse_from(["standalone-preact", "snapshot"]).unwrap();
        match cli.command {
            Command::Snapshot(args) => {
                assert_eq!(args.node_modules, PathBuf::from("node_modules"));
                assert_eq!(args.out, None);
            }
            _ => panic!("Expected Snapshot command"),
        }
    }
}
