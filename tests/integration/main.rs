//! Integration tests for brewse

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn brewse() -> Command {
        cargo_bin_cmd!("brewse")
    }

    /// Write a config that keeps every path inside `temp` and points the
    /// registry at a port nothing listens on
    fn write_config(temp: &Path) -> PathBuf {
        let config = format!(
            "[cache]\n\
             dir = '{cache}'\n\
             \n\
             [registry]\n\
             formulae_url = 'http://127.0.0.1:9/formula.json'\n\
             casks_url = 'http://127.0.0.1:9/cask.json'\n\
             timeout_secs = 2\n\
             \n\
             [manifest]\n\
             path = '{manifest}'\n",
            cache = temp.join("cache").display(),
            manifest = temp.join("Brewfile").display(),
        );
        let path = temp.join("config.toml");
        std::fs::write(&path, config).unwrap();
        path
    }

    fn seed_cache(temp: &Path) {
        let cache = temp.join("cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(
            cache.join("formulae.json"),
            r#"{"data": [{"name": "wget", "full_name": "wget", "desc": "Internet file retriever",
                 "homepage": "", "versions": {"stable": "1.24.5"}}],
                "timestamp": "2999-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        std::fs::write(
            cache.join("casks.json"),
            r#"{"data": [{"token": "vlc", "name": ["VLC"], "desc": "", "homepage": "",
                 "version": "3.0.20"}], "timestamp": "2999-01-01T00:00:00Z"}"#,
        )
        .unwrap();
    }

    #[test]
    fn help_displays() {
        brewse()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Interactive Homebrew package browser"))
            .stdout(predicate::str::contains("--immediate"));
    }

    #[test]
    fn version_displays() {
        brewse()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("brewse"));
    }

    #[test]
    fn immediate_and_no_apply_conflict() {
        brewse()
            .args(["--immediate", "--no-apply"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }

    #[test]
    fn browse_flags_rejected_with_other_subcommands() {
        brewse()
            .args(["--immediate", "cache", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("only be used with the browse command"));
    }

    #[test]
    fn config_path_honors_flag() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_prints_sections() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"))
            .stdout(predicate::str::contains("timeout_secs = 2"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("nested").join("config.toml");

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["config", "init"])
            .assert()
            .success();

        let written = std::fs::read_to_string(&config).unwrap();
        assert!(written.contains("ttl_hours = 24"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[cache\n").unwrap();

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["cache", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn cache_path_uses_configured_dir() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                temp.path().join("cache").display().to_string(),
            ));
    }

    #[test]
    fn cache_clear_removes_entries() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        seed_cache(temp.path());
        std::fs::write(temp.path().join("cache").join("notes.txt"), "keep").unwrap();

        brewse()
            .arg("--config")
            .arg(&config)
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 2 cached responses"));

        assert!(!temp.path().join("cache").join("formulae.json").exists());
        assert!(temp.path().join("cache").join("notes.txt").exists());
    }

    #[test]
    fn browse_reports_unreachable_registry() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        brewse()
            .arg("--config")
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to fetch formulae"));

        assert!(!temp.path().join("Brewfile").exists());
    }

    #[test]
    fn browse_from_cache_needs_a_terminal() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        seed_cache(temp.path());

        brewse()
            .arg("--config")
            .arg(&config)
            .arg("browse")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Loaded 2 packages"))
            .stderr(predicate::str::contains("interactive terminal"));
    }

    #[test]
    fn completions_generate() {
        brewse()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("brewse"));
    }
}
