use std::fs::File;
use std::io::BufReader;

use logcheck::transcript::{self, Options, Report};

pub const DATA_DIR: &str = "./tests/data/transcript";

pub fn data_file(name: &str) -> String {
    format!("{}/{}", DATA_DIR, name)
}

pub fn check_data_files(transcript_file: &str, expectations_file: &str, options: Options) -> Report {
    let transcript = BufReader::new(
        File::open(data_file(transcript_file))
            .unwrap_or_else(|_| panic!("Transcript file {} not found.", transcript_file)),
    );
    let expectations = BufReader::new(
        File::open(data_file(expectations_file))
            .unwrap_or_else(|_| panic!("Expectations file {} not found.", expectations_file)),
    );
    transcript::check(&options, transcript, expectations).unwrap()
}
