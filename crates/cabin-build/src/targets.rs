/// A Makefile target: a name, its prerequisites, and the commands that
/// build it. `phony` targets (like `tidy`) are emitted with a
/// `.PHONY:` declaration and never checked for timestamp freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub prerequisites: Vec<String>,
    pub commands: Vec<String>,
    pub phony: bool,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            prerequisites: Vec::new(),
            commands: Vec::new(),
            phony: false,
        }
    }

    pub fn prerequisite(mut self, prereq: impl Into<String>) -> Self {
        self.prerequisites.push(prereq.into());
        self
    }

    pub fn prerequisites(mut self, prereqs: impl IntoIterator<Item = String>) -> Self {
        self.prerequisites.extend(prereqs);
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn phony(mut self) -> Self {
        self.phony = true;
        self
    }
}
