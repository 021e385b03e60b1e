use std::path::PathBuf;

use roxi::{Phase, Roxi};

#[test]
fn run_showcase_script() {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("showcase.rox");
	let roxi = Roxi::new(Phase::Parse);
	assert!(roxi.run_file(&path).is_ok());
}

#[test]
fn scan_showcase_script() {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("showcase.rox");
	let roxi = Roxi::new(Phase::Scan);
	assert!(roxi.run_file(&path).is_ok());
}

#[test]
fn missing_script_is_an_internal_error() {
	let roxi = Roxi::new(Phase::Parse);
	let result = roxi.run_file(&PathBuf::from("no/such/script.rox"));
	assert!(matches!(result, Err(roxi::RoxiError::Internal(_))));
}
