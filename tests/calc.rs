#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	#[test]
	fn test_calc_file() {
		let calc = rcalc::Calc::default();
		let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("test.calc");
		let result = calc.run_file(&path);
		assert!(result.is_ok());
	}

	#[test]
	fn missing_file_is_an_error() {
		let calc = rcalc::Calc::default();
		assert!(calc.run_file("no-such-file.calc").is_err());
	}
}
