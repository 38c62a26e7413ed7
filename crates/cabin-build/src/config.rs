use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cabin_compiler::CompilerOptions;

use crate::compdb::CompileCommand;
use crate::discover::{all_sources, find_entry_points, is_header};
use crate::error::Error;
use crate::expand::{transitive_objects, HeadersByObject, ObjectsByStem};
use crate::layout::Layout;
use crate::makefile::Makefile;
use crate::mm::{self, DepInfo};
use crate::targets::Target;
use crate::test_discovery::is_test_source;
use crate::variables::{VarType, Variable};

/// Everything needed to assemble one profile's build graph: the
/// frozen inputs from the manifest/compiler-options layers plus the
/// output directory layout. Borrows nothing across calls; `construct`
/// does all the filesystem/compiler interaction and returns an
/// in-memory `Makefile` plus compilation database ready to render.
pub struct BuildConfig<'a> {
    pub layout: &'a Layout,
    pub pkg_name: &'a str,
    pub cxx: &'a str,
    pub options: &'a CompilerOptions,
    pub comp_db: bool,
    pub jobs: usize,
}

pub struct Constructed {
    pub makefile: Makefile,
    pub compile_commands: Vec<CompileCommand>,
    pub test_binaries: Vec<PathBuf>,
}

impl<'a> BuildConfig<'a> {
    pub fn construct(&self) -> Result<Constructed, Error> {
        let src_dir = self.layout.src_dir();
        let entries = find_entry_points(&src_dir)?;
        let sources = all_sources(&src_dir)?;
        let build_out_dir = self.layout.build_out_dir(self.pkg_name);

        let dep_infos = self.extract_all(&sources, &build_out_dir)?;

        let mut objects_by_stem = ObjectsByStem::new();
        let mut headers_by_object = HeadersByObject::new();
        for (source, info) in &dep_infos {
            let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let rel_dir = source
                .parent()
                .and_then(|p| p.strip_prefix(&src_dir).ok())
                .unwrap_or_else(|| Path::new(""))
                .to_path_buf();
            let object = self.layout.object_for(&build_out_dir, source);
            objects_by_stem.insert((rel_dir, stem.to_string()), object.clone());
            headers_by_object.insert(object, info.headers.clone());
        }

        let mut makefile = Makefile::new();
        let mut compile_commands = Vec::new();
        let mut artifacts = Vec::new();

        self.emit_common_variables(&mut makefile);

        for (source, info) in &dep_infos {
            let object = self.layout.object_for(&build_out_dir, source);
            self.emit_compile_target(&mut makefile, &mut compile_commands, source, &object, &info.headers, false);
        }

        if let Some(main_source) = &entries.binary {
            let main_object = self.layout.object_for(&build_out_dir, main_source);
            let stem = "main";
            let headers = dep_infos
                .iter()
                .find(|(s, _)| s == main_source)
                .map(|(_, info)| info.headers.clone())
                .unwrap_or_default();
            let mut objects = transitive_objects(stem, &headers, &src_dir, &objects_by_stem, &headers_by_object);
            objects.insert(0, main_object);

            let artifact = self.layout.binary_artifact(self.pkg_name).display().to_string();
            makefile.add_target(
                Target::new(artifact.clone())
                    .prerequisites(objects.iter().map(|o| o.display().to_string()))
                    .command("$(CXX) $(LDFLAGS) $^ $(LIBS) -o $@"),
            );
            artifacts.push(artifact);
        }

        if let Some(lib_source) = &entries.library {
            let lib_object = self.layout.object_for(&build_out_dir, lib_source);
            let stem = "lib";
            let headers = dep_infos
                .iter()
                .find(|(s, _)| s == lib_source)
                .map(|(_, info)| info.headers.clone())
                .unwrap_or_default();
            let mut objects = transitive_objects(stem, &headers, &src_dir, &objects_by_stem, &headers_by_object);
            objects.insert(0, lib_object);

            let artifact = self.layout.library_artifact(self.pkg_name).display().to_string();
            makefile.add_target(
                Target::new(artifact.clone())
                    .prerequisites(objects.iter().map(|o| o.display().to_string()))
                    .command("ar rcs $@ $^"),
            );
            artifacts.push(artifact);
        }

        makefile.add_target(Target::new("all".to_string()).phony().prerequisites(artifacts));

        let test_binaries = self.emit_unit_tests(
            &mut makefile,
            &mut compile_commands,
            &sources,
            &dep_infos,
            &objects_by_stem,
            &headers_by_object,
            &src_dir,
        )?;

        self.emit_tidy_targets(&mut makefile, &sources);

        Ok(Constructed {
            makefile,
            compile_commands,
            test_binaries,
        })
    }

    fn extract_all(
        &self,
        sources: &[PathBuf],
        cwd: &Path,
    ) -> Result<Vec<(PathBuf, DepInfo)>, Error> {
        let cflags = self.options.cflags.to_flags();
        let results: Mutex<Vec<(PathBuf, DepInfo)>> = Mutex::new(Vec::new());
        let errors: Mutex<Vec<Error>> = Mutex::new(Vec::new());

        let worker_count = self.jobs.max(1);
        std::thread::scope(|scope| {
            let chunks: Vec<&[PathBuf]> = if worker_count <= 1 {
                vec![sources]
            } else {
                chunk(sources, worker_count)
            };
            for chunk in chunks {
                let cflags = &cflags;
                let results = &results;
                let errors = &errors;
                scope.spawn(move || {
                    for source in chunk {
                        match mm::extract_dependencies(self.cxx, cflags, source, cwd) {
                            Ok(info) => results.lock().unwrap().push((source.clone(), info)),
                            Err(err) => errors.lock().unwrap().push(err),
                        }
                    }
                });
            }
        });

        let mut errors = errors.into_inner().unwrap();
        if let Some(err) = errors.pop() {
            return Err(err);
        }
        let mut results = results.into_inner().unwrap();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }

    fn emit_common_variables(&self, makefile: &mut Makefile) {
        makefile.add_variable(Variable::new("CXX", VarType::Conditional, self.cxx));
        makefile.add_variable(Variable::new(
            "CXXFLAGS",
            VarType::Recursive,
            self.options.cflags.other.join(" "),
        ));
        makefile.add_variable(Variable::new(
            "DEFINES",
            VarType::Recursive,
            self.options
                .cflags
                .macros
                .iter()
                .map(|m| m.flag())
                .collect::<Vec<_>>()
                .join(" "),
        ));
        makefile.add_variable(Variable::new(
            "INCLUDES",
            VarType::Recursive,
            self.options
                .cflags
                .include_dirs
                .iter()
                .map(|d| d.flag())
                .collect::<Vec<_>>()
                .join(" "),
        ));
        makefile.add_variable(Variable::new(
            "LDFLAGS",
            VarType::Recursive,
            self.options.ldflags.to_flags().join(" "),
        ));
        makefile.add_variable(Variable::new(
            "LIBS",
            VarType::Recursive,
            self.options
                .ldflags
                .libs
                .iter()
                .map(|l| format!("-l{}", l.0))
                .collect::<Vec<_>>()
                .join(" "),
        ));
        makefile.add_variable(Variable::new("Q", VarType::Conditional, "@"));
        makefile.add_variable(Variable::new("CABIN_TIDY", VarType::Conditional, "clang-tidy"));
        makefile.add_variable(Variable::new("CABIN_TIDY_FLAGS", VarType::Conditional, ""));
    }

    fn emit_compile_target(
        &self,
        makefile: &mut Makefile,
        compile_commands: &mut Vec<CompileCommand>,
        source: &Path,
        object: &Path,
        headers: &[PathBuf],
        is_test: bool,
    ) {
        let extra_define = if is_test { " -DCABIN_TEST" } else { "" };
        let compile_cmd = format!(
            "$(CXX) $(CXXFLAGS) $(DEFINES){extra_define} $(INCLUDES) -c {} -o $@",
            source.display()
        );
        makefile.add_target(
            Target::new(object.display().to_string())
                .prerequisite(source.display().to_string())
                .prerequisites(headers.iter().map(|h| h.display().to_string()))
                .command("@mkdir -p $(@D)")
                .command(compile_cmd),
        );

        let source_relative = source.strip_prefix(&self.layout.root).unwrap_or(source);
        let output_relative = object.strip_prefix(&self.layout.root).unwrap_or(object);
        let rendered_command = format!(
            "{} {} {}{} {} -c {} -o {}",
            self.cxx,
            self.options.cflags.other.join(" "),
            self.options.cflags.macros.iter().map(|m| m.flag()).collect::<Vec<_>>().join(" "),
            extra_define,
            self.options.cflags.include_dirs.iter().map(|d| d.flag()).collect::<Vec<_>>().join(" "),
            source.display(),
            object.display(),
        );
        compile_commands.push(CompileCommand {
            directory: self.layout.root.clone(),
            file: source_relative.to_path_buf(),
            output: output_relative.to_path_buf(),
            command: rendered_command,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_unit_tests(
        &self,
        makefile: &mut Makefile,
        compile_commands: &mut Vec<CompileCommand>,
        sources: &[PathBuf],
        dep_infos: &[(PathBuf, DepInfo)],
        objects_by_stem: &ObjectsByStem,
        headers_by_object: &HeadersByObject,
        src_dir: &Path,
    ) -> Result<Vec<PathBuf>, Error> {
        let cflags = self.options.cflags.to_flags();
        let unittest_out_dir = self.layout.unittest_out_dir();
        let mut test_binaries = Vec::new();

        for source in sources {
            if !is_test_source(self.cxx, &cflags, source, &self.layout.out_base)? {
                continue;
            }

            let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let relative = source.strip_prefix(src_dir).unwrap_or(source);
            let test_object = unittest_out_dir.join(relative).with_extension("o");

            let headers = dep_infos
                .iter()
                .find(|(s, _)| s == source)
                .map(|(_, info)| info.headers.clone())
                .unwrap_or_default();
            self.emit_compile_target(makefile, compile_commands, source, &test_object, &headers, true);

            let mut objects = transitive_objects(stem, &headers, src_dir, objects_by_stem, headers_by_object);
            objects.insert(0, test_object);

            let test_binary = unittest_out_dir.join(relative).with_extension("test");
            makefile.add_target(
                Target::new(test_binary.display().to_string())
                    .prerequisites(objects.iter().map(|o| o.display().to_string()))
                    .command("$(CXX) $(LDFLAGS) $^ $(LIBS) -o $@"),
            );
            test_binaries.push(test_binary);
        }
        Ok(test_binaries)
    }

    fn emit_tidy_targets(&self, makefile: &mut Makefile, sources: &[PathBuf]) {
        makefile.add_target(
            Target::new("tidy_%")
                .prerequisite("%")
                .command("$(CABIN_TIDY) $(CABIN_TIDY_FLAGS) $< -- $(CXXFLAGS) $(DEFINES) -DCABIN_TEST $(INCLUDES)"),
        );

        let tidy_names: Vec<String> = sources
            .iter()
            .filter(|s| !is_header(s))
            .map(|s| format!("tidy_{}", s.display()))
            .collect();
        makefile.add_target(
            Target::new("tidy")
                .phony()
                .prerequisites(tidy_names)
                .command("@true"),
        );
    }
}

fn chunk<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return vec![];
    }
    let size = items.len().div_ceil(workers).max(1);
    items.chunks(size).collect()
}

