use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PASSWORD: &str = "test-master-password-123";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vault"))
}

struct Env {
    home: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp home"),
        }
    }

    fn wallet_path(&self) -> PathBuf {
        self.home.path().join("wallet.json")
    }

    fn config_path(&self) -> PathBuf {
        self.home.path().join("config").join("vault").join("config.toml")
    }

    /// A command isolated from the caller's environment and terminal.
    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env("XDG_DATA_HOME", self.home.path().join("data"))
            .env_remove("VAULT_PATH")
            .env_remove("VAULT_CONFIG")
            .env_remove("VAULT_PASSWORD")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str], password: Option<&str>) -> Output {
        let mut cmd = self.command();
        cmd.arg("--wallet").arg(self.wallet_path()).args(args);
        if let Some(password) = password {
            cmd.env("VAULT_PASSWORD", password);
        }
        cmd.output().expect("run vault")
    }

    fn init(&self) {
        let output = self.run(&["init"], Some(PASSWORD));
        assert!(
            output.status.success(),
            "init failed: stdout={}, stderr={}",
            stdout(&output),
            stderr(&output)
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn read_json(path: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).expect("read wallet");
    serde_json::from_str(&contents).expect("wallet is json")
}

#[test]
fn test_cli_init_add_get_list() {
    let env = Env::new();
    env.init();

    let add = env.run(&["add", "email", "a@b.com"], Some(PASSWORD));
    assert!(add.status.success(), "add failed: {}", stderr(&add));
    let add = env.run(&["add", "pin", "1234"], Some(PASSWORD));
    assert!(add.status.success());

    let get = env.run(&["get", "email"], Some(PASSWORD));
    assert!(get.status.success(), "get failed: {}", stderr(&get));
    assert_eq!(stdout(&get), "a@b.com\n");

    let list = env.run(&["list"], Some(PASSWORD));
    assert!(list.status.success());
    assert_eq!(stdout(&list), "email\npin\n");
}

#[test]
fn test_cli_wallet_file_hides_plaintext() {
    let env = Env::new();
    env.init();
    let add = env.run(&["add", "email", "a@b.com"], Some(PASSWORD));
    assert!(add.status.success());

    let value = read_json(&env.wallet_path());
    assert!(value.get("master").and_then(|v| v.as_str()).is_some());
    let keys = value.get("keys").and_then(|v| v.as_object()).expect("keys");
    assert_eq!(keys.len(), 1);

    let raw = std::fs::read_to_string(env.wallet_path()).unwrap();
    assert!(!raw.contains("email"));
    assert!(!raw.contains("a@b.com"));
    assert!(!raw.contains(PASSWORD));
}

#[test]
fn test_cli_add_reads_value_from_stdin() {
    let env = Env::new();
    env.init();

    let mut cmd = env.command();
    cmd.arg("--wallet")
        .arg(env.wallet_path())
        .args(["add", "note"])
        .env("VAULT_PASSWORD", PASSWORD)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn add");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"multi word secret\n")
        .expect("write stdin");
    let add = child.wait_with_output().expect("wait add");
    assert!(add.status.success(), "add failed: {}", stderr(&add));

    let get = env.run(&["get", "note"], Some(PASSWORD));
    assert_eq!(stdout(&get), "multi word secret\n");
}

#[test]
fn test_cli_wrong_password_exits_auth_failed() {
    let env = Env::new();
    env.init();

    let get = env.run(&["get", "email"], Some("not-the-password"));
    assert_eq!(get.status.code(), Some(5));
    assert!(stderr(&get).contains("Master password not recognized"));
}

#[test]
fn test_cli_missing_password_exits_auth_failed() {
    let env = Env::new();
    env.init();

    let list = env.run(&["list"], None);
    assert_eq!(list.status.code(), Some(5));
    assert!(stderr(&list).contains("VAULT_PASSWORD"));
}

#[test]
fn test_cli_unknown_key_exits_not_found() {
    let env = Env::new();
    env.init();

    let get = env.run(&["get", "missing"], Some(PASSWORD));
    assert_eq!(get.status.code(), Some(3));
    assert!(stderr(&get).contains("\"missing\""));
}

#[test]
fn test_cli_missing_wallet_exits_not_found() {
    let env = Env::new();

    let get = env.run(&["get", "email"], Some(PASSWORD));
    assert_eq!(get.status.code(), Some(3));
    assert!(stderr(&get).contains("vault init"));
    assert!(!env.wallet_path().exists());
}

#[test]
fn test_cli_malformed_wallet_exits_integrity_failed() {
    let env = Env::new();
    std::fs::write(env.wallet_path(), "{\"keys\": {}}").unwrap();

    let list = env.run(&["list"], Some(PASSWORD));
    assert_eq!(list.status.code(), Some(6));
    assert!(stderr(&list).contains("not well-formed"));
}

#[test]
fn test_cli_init_refuses_existing_file() {
    let env = Env::new();
    env.init();
    let before = std::fs::read(env.wallet_path()).unwrap();

    let again = env.run(&["init"], Some(PASSWORD));
    assert_eq!(again.status.code(), Some(4));
    assert_eq!(std::fs::read(env.wallet_path()).unwrap(), before);
}

#[test]
fn test_cli_init_without_password_writes_nothing() {
    let env = Env::new();

    let init = env.run(&["init"], None);
    assert_eq!(init.status.code(), Some(5));
    assert!(!env.wallet_path().exists());
}

#[test]
fn test_cli_init_without_password_creates_no_directory() {
    let env = Env::new();
    let nested = env.home.path().join("new").join("dir");

    let mut init = env.command();
    init.arg("init").arg(nested.join("wallet.json"));
    let init = init.output().expect("run init");

    assert_eq!(init.status.code(), Some(5));
    assert!(!env.home.path().join("new").exists());
}

#[test]
fn test_cli_init_writes_config_used_later() {
    let env = Env::new();
    env.init();

    let config = std::fs::read_to_string(env.config_path()).expect("config written");
    assert!(config.contains("[wallet]"));
    assert!(config.contains(&env.wallet_path().to_string_lossy().to_string()));

    let mut add = env.command();
    add.args(["add", "email", "a@b.com"])
        .env("VAULT_PASSWORD", PASSWORD);
    let add = add.output().expect("run add");
    assert!(add.status.success(), "add failed: {}", stderr(&add));

    let get = env.run(&["get", "email"], Some(PASSWORD));
    assert_eq!(stdout(&get), "a@b.com\n");
}

#[test]
fn test_cli_shell_runs_piped_commands() {
    let env = Env::new();
    env.init();

    let mut cmd = env.command();
    cmd.arg("--wallet")
        .arg(env.wallet_path())
        .args(["--ttl", "60", "shell"])
        .env("VAULT_PASSWORD", PASSWORD)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn shell");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"add email a@b.com\nget email\n\nlist\nstatus\nlock\nstatus\nbogus\nquit\nget email\n")
        .expect("write stdin");
    let shell = child.wait_with_output().expect("wait shell");

    assert!(shell.status.success(), "shell failed: {}", stderr(&shell));
    let out = stdout(&shell);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Added \"email\"",
            "a@b.com",
            "email",
            "unlocked (ttl 60s)",
            "Locked.",
            "locked (ttl 60s)",
        ]
    );
    let err = stderr(&shell);
    assert!(err.contains("Unknown command: bogus"));
    assert_eq!(err.matches("stays cached").count(), 1);
}

#[test]
fn test_cli_without_command_prints_quickstart() {
    let env = Env::new();
    let output = env.command().output().expect("run vault");
    assert!(output.status.success());
    assert!(stdout(&output).contains("vault init"));
}
