use assert_cmd::Command;

fn bookshelf() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("BOOKSHELF_ENV", "local");
    cmd
}

#[test]
fn openapi_prints_book_routes() {
    let output = bookshelf().arg("openapi").output().unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(document["paths"]["/books"]["get"].is_object());
    assert!(document["paths"]["/create_book"]["post"].is_object());
    assert!(document["components"]["schemas"]["BookRequest"].is_object());
}

#[test]
fn unknown_environment_fails() {
    bookshelf()
        .env("BOOKSHELF_ENV", "moon")
        .arg("openapi")
        .assert()
        .failure();
}

#[test]
fn serve_rejects_invalid_port() {
    bookshelf()
        .args(["serve", "--port", "not-a-port"])
        .assert()
        .failure();
}
