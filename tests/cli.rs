use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_fixtures(dir: &Path) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(
        dir.join("data/members.json"),
        r#"[
          {"id":"m-001","name":"Premier Cocoa Exports","description":"Cocoa sourcing and export",
           "address":"Dugbe, Ibadan","phone":"+234 803 555 0001","website":"https://premiercocoa.ng",
           "yearEstablished":1987,"membershipLevel":3,"services":["sourcing","export"]},
          {"id":"m-002","name":"Adire Textile Hub","description":"Hand-dyed fabrics",
           "address":"Oje Market Road, Ibadan","phone":"+234 802 555 0002","website":"https://adirehub.ng",
           "yearEstablished":2003,"membershipLevel":2,"services":["dyeing"]},
          {"id":"m-003","name":"Oke-Ado Motors","description":"Vehicle sales and servicing",
           "address":"Liberty Road, Ibadan","phone":"+234 805 555 0003","website":"https://okeadomotors.com",
           "yearEstablished":1995,"membershipLevel":1,"services":["sales"]}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("data/rides.json"),
        r#"[
          {"id":"ride-001","title":"Sunrise River Loop","date":"2099-09-12","time":"7:00 AM",
           "difficulty":"Beginner","distance":14,"duration":"1.5 hours",
           "description":"Easy spin along the river path.","leader":"Sade Balogun",
           "meetingPoint":"Agodi Gardens Gate","maxParticipants":15,"currentParticipants":9,
           "features":["Scenic","Cafe stop"],"requirements":["Helmet"]},
          {"id":"ride-002","title":"Old Oyo Road Century Prep","date":"2099-09-26","time":"6:30 AM",
           "difficulty":"Advanced","distance":52,"duration":"4 hours",
           "description":"Long steady effort with paceline practice.","leader":"Chinwe Okafor",
           "meetingPoint":"Mokola Roundabout","maxParticipants":10,"currentParticipants":10,
           "features":["Paceline"],"requirements":["Helmet","Flat kit"]}
        ]"#,
    )
    .unwrap();
}

fn plaza(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plaza").unwrap();
    cmd.current_dir(dir)
        .env("PLAZA_HOME", dir.join("home"))
        .arg("--plain");
    cmd
}

#[test]
fn list_members_grid_shows_every_member_with_badges() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["list", "members"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Premier Cocoa Exports"))
        .stdout(predicate::str::contains("Adire Textile Hub"))
        .stdout(predicate::str::contains("Oke-Ado Motors"))
        .stdout(predicate::str::contains("[Gold]"))
        .stdout(predicate::str::contains("Address:"));
}

#[test]
fn category_filter_selects_the_gold_member() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["list", "members", "--category", "gold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Premier Cocoa Exports"))
        .stdout(predicate::str::contains("Adire Textile Hub").not());
}

#[test]
fn search_is_case_insensitive_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    for term in ["COCOA", "cocoa"] {
        plaza(dir.path())
            .args(["list", "members", "--search", term, "--view", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Premier Cocoa Exports"))
            .stdout(predicate::str::contains("Oke-Ado Motors").not());
    }
}

#[test]
fn list_mode_is_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["list", "rides", "--view", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunrise River Loop — Sep 12"))
        .stdout(predicate::str::contains("led by Sade Balogun"));
}

#[test]
fn an_empty_result_set_renders_the_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["list", "rides", "--distance", "medium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching records."));
}

#[test]
fn missing_members_fixture_fails_with_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();

    plaza(dir.path())
        .args(["list", "members"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Load error"))
        .stderr(predicate::str::contains("retry"));
}

#[test]
fn attractions_fall_back_to_the_builtin_dataset() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();

    plaza(dir.path())
        .args(["list", "attractions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("University of Ibadan"))
        .stdout(predicate::str::contains("builtin dataset"));
}

#[test]
fn show_prints_the_detail_view() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["show", "rides", "ride-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Beginner] Sunrise River Loop"))
        .stdout(predicate::str::contains("Meeting point:"))
        .stdout(predicate::str::contains("Requirements"));
}

#[test]
fn show_unknown_id_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["show", "rides", "ride-999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn join_then_list_then_cancel_registrations() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args([
            "join",
            "ride-001",
            "--name",
            "Sade Balogun",
            "--email",
            "sade@example.ng",
            "--agree",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully registered"));

    let output = plaza(dir.path())
        .args(["registrations"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Sunrise River Loop"));
    assert!(stdout.contains("confirmed"));

    let reg_id = stdout
        .split_whitespace()
        .find(|w| w.starts_with("REG-"))
        .expect("registration id in listing")
        .to_string();

    plaza(dir.path())
        .args(["registrations", "--cancel", &reg_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));

    plaza(dir.path())
        .args(["registrations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
}

#[test]
fn join_with_invalid_input_fails_without_registering() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args([
            "join",
            "ride-001",
            "--name",
            "Sade Balogun",
            "--email",
            "not-an-email",
            "--agree",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email address"));

    plaza(dir.path())
        .args(["registrations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No registrations yet."));
}

#[test]
fn a_full_ride_cannot_be_joined() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args([
            "join",
            "ride-002",
            "--name",
            "Tunde Akintola",
            "--email",
            "tunde@example.ng",
            "--agree",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is full"));
}

#[test]
fn rides_survive_a_broken_fixture_via_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    // Prime the cache.
    plaza(dir.path())
        .args(["list", "rides"])
        .assert()
        .success();

    fs::remove_file(dir.path().join("data/rides.json")).unwrap();

    plaza(dir.path())
        .args(["list", "rides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunrise River Loop"))
        .stdout(predicate::str::contains("cached ride data"));
}

#[test]
fn stats_summarizes_the_rides() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rides: 2"))
        .stdout(predicate::str::contains("beginner 1"))
        .stdout(predicate::str::contains("Old Oyo Road Century Prep"))
        .stdout(predicate::str::contains("Full"));
}

#[test]
fn config_get_and_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = light"));

    plaza(dir.path())
        .args(["config", "theme", "dark"])
        .assert()
        .success();

    plaza(dir.path())
        .args(["config", "theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = dark"));
}

#[test]
fn export_writes_a_backup_archive() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["export", "--out", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let found = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.starts_with("plaza-") && name.ends_with(".tar.gz")
        });
    assert!(found, "expected a plaza-*.tar.gz in the temp dir");
}

#[test]
fn repeat_visits_are_greeted() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    plaza(dir.path())
        .args(["list", "members"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome!"));

    plaza(dir.path())
        .args(["list", "members"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Back so soon! Awesome!"));
}
