use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::dag::Dag;
use crate::error::Error;
use crate::targets::Target;
use crate::variables::Variable;

const WRAP_COLUMN: usize = 80;

/// The full set of variables and targets that make up a build's
/// Makefile, stored separately from the dependency information needed
/// to order them (mirroring how the targets/variables are discovered
/// incrementally but emitted only after the whole graph is known).
#[derive(Debug, Default)]
pub struct Makefile {
    variables: Vec<Variable>,
    targets: Vec<Target>,
}

impl Makefile {
    pub fn new() -> Self {
        Makefile::default()
    }

    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Topologically sorts variables (forward: a variable referencing
    /// another must appear after it) and targets (reverse topo order),
    /// then renders the deterministic Makefile text. A cycle in either
    /// graph is a fatal "too complex build graph" error and no text is
    /// produced.
    pub fn render(&self) -> Result<String, Error> {
        let variables_by_name: BTreeMap<&str, &Variable> =
            self.variables.iter().map(|v| (v.name.as_str(), v)).collect();
        let mut var_graph: Dag<String> = Dag::new();
        for variable in &self.variables {
            var_graph.add_node(variable.name.clone());
            for reference in variable.references() {
                if variables_by_name.contains_key(reference.as_str()) {
                    var_graph.depends_on(variable.name.clone(), reference);
                }
            }
        }
        let variable_order = var_graph.topo_sort_forward()?;

        let targets_by_name: BTreeMap<&str, &Target> =
            self.targets.iter().map(|t| (t.name.as_str(), t)).collect();
        let mut target_graph: Dag<String> = Dag::new();
        for target in &self.targets {
            target_graph.add_node(target.name.clone());
            for prereq in &target.prerequisites {
                if targets_by_name.contains_key(prereq.as_str()) {
                    target_graph.depends_on(target.name.clone(), prereq.clone());
                }
            }
        }
        let target_order = target_graph.topo_sort_reverse()?;

        let mut out = String::new();
        for name in &variable_order {
            let variable = variables_by_name[name.as_str()];
            writeln!(out, "{variable}").unwrap();
        }
        if !variable_order.is_empty() {
            out.push('\n');
        }

        let phony: Vec<&str> = self
            .targets
            .iter()
            .filter(|t| t.phony)
            .map(|t| t.name.as_str())
            .collect();
        if !phony.is_empty() {
            writeln!(out, ".PHONY: {}", phony.join(" ")).unwrap();
            out.push('\n');
        }

        for name in &target_order {
            let target = targets_by_name[name.as_str()];
            render_target(&mut out, target);
        }

        Ok(out)
    }
}

fn render_target(out: &mut String, target: &Target) {
    write!(out, "{}:", target.name).unwrap();
    render_wrapped_prerequisites(out, &target.prerequisites);
    out.push('\n');
    for command in &target.commands {
        let prefixed = if command.starts_with('@') {
            command.clone()
        } else {
            format!("$(Q){command}")
        };
        writeln!(out, "\t{prefixed}").unwrap();
    }
    out.push('\n');
}

/// Wraps prerequisite lists at 80 columns with backslash continuations
/// and a two-space indent on each continuation line.
fn render_wrapped_prerequisites(out: &mut String, prerequisites: &[String]) {
    let mut column = out.lines().last().map(str::len).unwrap_or(0);
    for prereq in prerequisites {
        let piece = format!(" {prereq}");
        if column + piece.len() + 2 > WRAP_COLUMN && column > 0 {
            out.push_str(" \\\n  ");
            column = 2;
            out.push_str(prereq);
            column += prereq.len();
        } else {
            out.push_str(&piece);
            column += piece.len();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::variables::VarType;

    #[test]
    fn variables_are_ordered_before_their_references() {
        let mut makefile = Makefile::new();
        makefile.add_variable(Variable::new("CXXFLAGS", VarType::Recursive, "$(BASE) -Wall"));
        makefile.add_variable(Variable::new("BASE", VarType::Simple, "-std=c++20"));

        let rendered = makefile.render().unwrap();
        assert!(rendered.find("BASE :=").unwrap() < rendered.find("CXXFLAGS =").unwrap());
    }

    #[test]
    fn targets_are_emitted_in_reverse_topological_order() {
        let mut makefile = Makefile::new();
        makefile.add_target(Target::new("app").prerequisite("main.o").command("$(CXX) -o app main.o"));
        makefile.add_target(Target::new("main.o").command("$(CXX) -c main.cc -o main.o"));

        let rendered = makefile.render().unwrap();
        assert!(rendered.find("app:").unwrap() < rendered.find("main.o:").unwrap());
    }

    #[test]
    fn commands_get_a_q_prefix_unless_already_at_prefixed() {
        let mut makefile = Makefile::new();
        makefile.add_target(
            Target::new("obj.o")
                .command("@mkdir -p $(@D)")
                .command("$(CXX) -c $< -o $@"),
        );
        let rendered = makefile.render().unwrap();
        assert!(rendered.contains("\t@mkdir -p $(@D)"));
        assert!(rendered.contains("\t$(Q)$(CXX) -c $< -o $@"));
    }

    #[test]
    fn phony_targets_get_a_phony_declaration() {
        let mut makefile = Makefile::new();
        makefile.add_target(Target::new("tidy").phony().command("@echo done"));
        let rendered = makefile.render().unwrap();
        assert!(rendered.contains(".PHONY: tidy"));
    }

    #[test]
    fn long_prerequisite_lists_wrap_at_eighty_columns() {
        let mut makefile = Makefile::new();
        let mut target = Target::new("lib.a");
        for i in 0..20 {
            target = target.prerequisite(format!("some/long/path/object_{i:02}.o"));
        }
        makefile.add_target(target);
        let rendered = makefile.render().unwrap();
        assert!(rendered.contains("\\\n  "));
        for line in rendered.lines() {
            assert!(line.len() <= WRAP_COLUMN + 2);
        }
    }
}
