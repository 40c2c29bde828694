use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_cli_filter_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args(["filter", "tests/fixtures/listings.csv", "--location", "spain", "--sort", "asc"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("id,name,location,price,rating\n"))
        .stdout(predicate::str::contains(
            "h2,Costa Verde,Northern Spain Coast,120,4.4\nh4,Casa Madrid,\"Madrid, Spain\",120,3.5\n",
        ))
        .stdout(predicate::str::contains("h1,").not());

    Ok(())
}

#[test]
fn test_cli_filter_price_rating_and_sort() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args([
        "filter",
        "tests/fixtures/listings.csv",
        "--min-price",
        "100",
        "--max-price",
        "800",
        "--min-rating",
        "5",
        "--sort",
        "desc",
    ]);

    cmd.assert().success().stdout(predicate::eq(
        "id,name,location,price,rating\n\
         h3,Tokyo Luxury Suite,\"Tokyo, Japan\",720,4.5\n\
         h1,Grand Hotel Paris,\"Paris, France\",450,4.8\n",
    ));
}

#[test]
fn test_cli_filter_paging() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args([
        "filter",
        "tests/fixtures/listings.csv",
        "--sort",
        "asc",
        "--page",
        "2",
        "--page-size",
        "2",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("h4,"))
        .stdout(predicate::str::contains("h1,"))
        .stdout(predicate::str::contains("h6,").not());
}

#[test]
fn test_cli_filter_rejects_out_of_range_rating() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args(["filter", "tests/fixtures/listings.csv", "--min-rating", "6"]);

    cmd.assert().failure();
}

#[test]
fn test_cli_skips_malformed_rows() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "id,name,location,price,rating").unwrap();
    writeln!(csv, "h1,Good,\"Rome, Italy\",100,4").unwrap();
    writeln!(csv, "h2,Bad,\"Rome, Italy\",cheap,4").unwrap();
    writeln!(csv, "h3,Also Good,\"Milan, Italy\",200,5").unwrap();

    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.arg("filter").arg(csv.path()).args(["--location", "Italy"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading listing"))
        .stdout(predicate::str::contains("h1,"))
        .stdout(predicate::str::contains("h3,"))
        .stdout(predicate::str::contains("h2,").not());
}

#[test]
fn test_cli_location_counts() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args(["locations", "tests/fixtures/listings.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ALL: 6"))
        .stdout(predicate::str::contains("Spain: 2"))
        .stdout(predicate::str::contains("Greece: 0"));
}

#[test]
fn test_cli_checkout_unreachable_backend_fails() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args([
        "checkout",
        "--booking-id",
        "bk_1",
        "--backend-url",
        "http://127.0.0.1:9",
        "--auth-token",
        "tok_abc",
        "--timeout-secs",
        "5",
    ]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::starts_with("failed: "));
}

#[test]
fn test_cli_checkout_rejects_empty_booking_id() {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.args(["checkout", "--booking-id", "", "--auth-token", "tok_abc"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Booking id must not be empty"));
}
