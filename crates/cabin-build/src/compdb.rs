use std::path::PathBuf;

use serde::Serialize;
use snafu::ResultExt;

use crate::error::{self, Error};

/// One entry of `compile_commands.json`: `directory` is the project
/// root, `file`/`output` are relative to it, and `command` is the
/// exact invocation that would run (with `-DCABIN_TEST` appended for
/// test objects).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompileCommand {
    pub directory: PathBuf,
    pub file: PathBuf,
    pub output: PathBuf,
    pub command: String,
}

pub fn render(entries: &[CompileCommand]) -> Result<String, Error> {
    serde_json::to_string_pretty(entries).context(error::SerializeSnafu)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_a_json_array() {
        let entries = vec![CompileCommand {
            directory: PathBuf::from("/proj"),
            file: PathBuf::from("src/main.cc"),
            output: PathBuf::from("cabin-out/dev/hello.d/main.o"),
            command: "g++ -std=c++20 -c src/main.cc -o cabin-out/dev/hello.d/main.o".to_string(),
        }];
        let rendered = render(&entries).unwrap();
        assert!(rendered.contains("\"file\": \"src/main.cc\""));
        assert!(rendered.trim_start().starts_with('['));
    }
}
