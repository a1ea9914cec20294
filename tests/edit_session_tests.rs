use predicates::prelude::*;

#[test]
fn edit_session_applies_commands_from_stdin() {
    let script = "\
add-question
total 1200
percent q2 o2-1 140
label q2 o2-3
type q1 multi
remove-option q3 o3-3
show
quit
";

    let mut cmd = assert_cmd::cargo_bin_cmd!("surveyviz");
    cmd.arg("edit").env_remove("GEMINI_API_KEY").write_stdin(script);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total count: 1200"))
        .stdout(predicate::str::contains("1,200 responses match the search"))
        .stdout(predicate::str::contains("Q1 [Multi choice]"))
        .stdout(predicate::str::contains("New question"))
        .stdout(predicate::str::contains("140%"))
        .stdout(predicate::str::contains("[o2-3] : 0%"))
        .stdout(predicate::str::contains("[o3-3]").not())
        .stdout(predicate::str::contains("Bye"));
}

#[test]
fn edit_session_import_without_credential_keeps_survey() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("surveyviz");
    cmd.arg("edit")
        .env_remove("GEMINI_API_KEY")
        .write_stdin("import Q1 tea? yes 60% no 40%\nwait\nshow\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Could not parse the survey text"))
        .stdout(predicate::str::contains("3,996 responses match the search"));
}
