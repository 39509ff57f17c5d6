use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BUNDLE: &str = r#"{
    "categories": [
        {"id": 1, "name": "Salary", "type": "income", "icon": "💰"},
        {"id": 2, "name": "Groceries", "type": "expense", "icon": "🛒"},
        {"id": 3, "name": "Rent", "type": "expense", "icon": "🏠"}
    ],
    "transactions": [
        {"id": 1, "category": 1, "amount": "3000.00", "date": "2025-03-01",
         "payment_mode": "upi", "description": "March salary"},
        {"id": 2, "category": 3, "amount": "1200.00", "date": "2025-03-02",
         "payment_mode": "upi", "description": "Rent"},
        {"id": 3, "category": 2, "amount": "85.40", "date": "2025-03-09",
         "payment_mode": "card", "description": "Weekly shop"},
        {"id": 4, "category": 1, "amount": "3000.00", "date": "2025-02-01",
         "payment_mode": "upi", "description": "February salary"},
        {"id": 5, "category": 2, "amount": "410.00", "date": "2025-02-12",
         "payment_mode": "cash", "description": "Groceries"}
    ],
    "budgets": [
        {"id": 1, "category": 2, "month": "2025-03-01", "amount": "400.00"}
    ],
    "goals": [
        {"id": 1, "title": "Emergency fund", "target_amount": "5000.00",
         "current_amount": "1250.00", "is_active": true}
    ]
}"#;

struct Fixture {
    data_dir: TempDir,
    bundle: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let data_dir = TempDir::new().unwrap();
        let bundle = data_dir.path().join("records.json");
        fs::write(&bundle, BUNDLE).unwrap();
        Self { data_dir, bundle }
    }

    /// Command isolated to the fixture's data directory
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pftracker").unwrap();
        cmd.env("PFTRACKER_DATA_DIR", self.data_dir.path())
            .env_remove("PFTRACKER_API_URL")
            .env_remove("PFTRACKER_PASSWORD")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Command reading from the local bundle
    fn local(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--input").arg(&self.bundle);
        cmd
    }
}

#[test]
fn test_no_command_prints_hint() {
    let fx = Fixture::new();
    fx.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("pftracker --help"));
}

#[test]
fn test_analytics_json() {
    let fx = Fixture::new();
    let output = fx
        .local()
        .args(["report", "analytics", "--as-of", "2025-03-15", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["healthScore"].as_u64().unwrap() <= 100);
    assert_eq!(value["monthlyData"].as_array().unwrap().len(), 6);
    assert!(value["monthComparison"]["currentMonth"].is_object());
    assert!(value["categoryData"].is_array());
}

#[test]
fn test_analytics_table() {
    let fx = Fixture::new();
    fx.local()
        .args(["report", "analytics", "--as-of", "2025-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Health Score:"))
        .stdout(predicate::str::contains("Top Categories"))
        .stdout(predicate::str::contains("Rent"));
}

#[test]
fn test_analytics_csv_to_file() {
    let fx = Fixture::new();
    let out = fx.data_dir.path().join("analytics.csv");
    fx.local()
        .args(["report", "analytics", "--as-of", "2025-03-15", "-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Section,Label,Period,Income,Expense,Amount"));
}

#[test]
fn test_goals_report_rejects_csv() {
    let fx = Fixture::new();
    fx.local()
        .args(["report", "goals", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV is not available"));
}

#[test]
fn test_invalid_as_of_date() {
    let fx = Fixture::new();
    fx.local()
        .args(["report", "overview", "--as-of", "15/03/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn test_transaction_list() {
    let fx = Fixture::new();
    fx.local()
        .args(["transaction", "list", "--kind", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly shop"))
        .stdout(predicate::str::contains("3 transaction(s)"))
        .stdout(predicate::str::contains("March salary").not());
}

#[test]
fn test_txn_alias_with_limit() {
    let fx = Fixture::new();
    fx.local()
        .args(["txn", "list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s)"));
}

#[test]
fn test_transaction_export_csv() {
    let fx = Fixture::new();
    fx.local()
        .args(["transaction", "export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Date,Category,Amount,Payment Mode,Description",
        ));
}

#[test]
fn test_input_bundle_is_read_only() {
    let fx = Fixture::new();
    fx.local()
        .args(["goal", "add", "Holiday", "800"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn test_export_round_trips_as_input() {
    let fx = Fixture::new();
    let out = fx.data_dir.path().join("export.json");
    fx.local()
        .args(["export", "-o"])
        .arg(&out)
        .assert()
        .success();

    let exported = fs::read_to_string(&out).unwrap();
    assert!(exported.contains("\"schema_version\""));

    fx.cmd()
        .arg("--input")
        .arg(&out)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_missing_bundle() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--input", "does-not-exist.json", "report", "goals"])
        .assert()
        .failure();
}

#[test]
fn test_whoami_without_session() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pftracker login"));
}

#[test]
fn test_account_commands_need_api() {
    let fx = Fixture::new();
    fx.local()
        .arg("logout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("drop --input"));
}

#[test]
fn test_config_set_and_show() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "set", "currency_symbol", "€"])
        .assert()
        .success();

    fx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currency_symbol:      €"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn test_api_url_flag_overrides_config() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--api-url", "http://finance.local:9000/api", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://finance.local:9000/api"));
}

#[test]
fn test_config_set_unknown_key() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "set", "theme", "dark"])
        .assert()
        .failure();
}
