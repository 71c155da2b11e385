//! Integration tests for dictcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's environment and config
    fn dictcache(dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("dictcache");
        cmd.current_dir(dir)
            .env_remove("DICTCACHE_HOME")
            .env("DICTCACHE_CONFIG", dir.join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache-backed dictionary loader"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dictcache"));
    }

    #[test]
    fn resources_lists_bundled() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .arg("resources")
            .assert()
            .success()
            .stdout(predicate::str::contains("stop-words/en.txt"))
            .stdout(predicate::str::contains("symbols/ja.tsv"));
    }

    #[test]
    fn load_bundled_resource_plain() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["load", "--resource", "stop-words/en.txt", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("the\n"));
    }

    #[test]
    fn load_missing_resource_is_empty() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["load", "--resource", "no/such.txt", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn load_file_in_working_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("words.txt"), "a\nb\na\n").unwrap();

        dictcache(temp.path())
            .args(["load", "--file", "words.txt", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"a\""))
            .stdout(predicate::str::contains("\"b\""));
    }

    #[test]
    fn load_key_value_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("symbols.tsv"), "COMMA\t、\n").unwrap();

        dictcache(temp.path())
            .args(["load", "-f", "symbols.tsv", "-k", "key-value", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("COMMA\t、"));
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["load", "--file", "missing.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("File not found"));
    }

    #[test]
    fn load_outside_roots_fails() {
        let work = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let outside = other.path().join("words.txt");
        fs::write(&outside, "a\n").unwrap();

        dictcache(work.path())
            .args(["load", "--file"])
            .arg(&outside)
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not under $DICTCACHE_HOME(not specified)"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn home_env_authorizes_file() {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let file = home.path().join("words.txt");
        fs::write(&file, "a\n").unwrap();

        dictcache(work.path())
            .env("DICTCACHE_HOME", home.path())
            .args(["load", "--format", "plain", "--file"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("a"));
    }

    #[test]
    fn home_flag_authorizes_check() {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let file = home.path().join("words.txt");
        fs::write(&file, "a\n").unwrap();

        dictcache(work.path())
            .arg("check")
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not under"));

        dictcache(work.path())
            .arg("--home")
            .arg(home.path())
            .arg("check")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("words.txt"));
    }

    #[test]
    fn load_configured_dictionaries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("jargon.txt"), "synergy\n").unwrap();
        fs::write(
            temp.path().join("config.toml"),
            r#"
[[dictionaries]]
name = "stop words"
resource = "stop-words/en.txt"

[[dictionaries]]
name = "jargon"
kind = "word-list"
file = "jargon.txt"
"#,
        )
        .unwrap();

        dictcache(temp.path())
            .arg("load")
            .assert()
            .success()
            .stdout(predicate::str::contains("stop words"))
            .stdout(predicate::str::contains("word-list, 1 entries"));
    }

    #[test]
    fn load_configured_reports_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            r#"
[[dictionaries]]
name = "missing"
file = "missing.txt"
"#,
        )
        .unwrap();

        dictcache(temp.path())
            .arg("load")
            .assert()
            .failure()
            .stdout(predicate::str::contains("File not found"))
            .stderr(predicate::str::contains("1 of 1 dictionaries failed to load"));
    }

    #[test]
    fn load_without_config_warns() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .arg("load")
            .assert()
            .success()
            .stdout(predicate::str::contains("No dictionaries configured"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        dictcache(temp.path())
            .args(["config", "set", "sandbox.home", "/srv/dicts"])
            .assert()
            .success();

        dictcache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("home = \"/srv/dicts\""));
    }
}
