// Test double for the host machine: resolves executables, runs commands and answers
// prompts from an in-memory description, recording every invocation in order.

use crate::errors::BootstrapError;
use crate::libs::context::RunContext;
use crate::libs::detection::ExecutableLocator;
use crate::libs::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::libs::prompt::Prompter;
use crate::libs::utilities::platform::Platform;
use crate::schemas::config::RunPolicy;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_BIN_DIR: &str = "/fake/bin";

#[derive(Debug, Clone)]
struct FakeTool {
    dir: PathBuf,
    /// `None` makes the version query exit non-zero.
    version_output: Option<String>,
}

#[derive(Debug, Clone)]
struct FakeRule {
    pattern: String,
    exit_code: i32,
    provides: Option<(String, FakeTool)>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeSystem {
    tools: RefCell<BTreeMap<String, FakeTool>>,
    files: RefCell<HashSet<PathBuf>>,
    rules: RefCell<Vec<FakeRule>>,
    unspawnable: RefCell<HashSet<String>>,
    invocations: RefCell<Vec<Invocation>>,
    answers: RefCell<VecDeque<bool>>,
    prompts: RefCell<Vec<String>>,
}

impl FakeSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Apple Silicon context with a minimal search path.
    pub(crate) fn context() -> RunContext {
        RunContext::new(
            Platform::new("macos", "arm64"),
            RunPolicy::Lenient,
            vec![PathBuf::from("/usr/bin")],
        )
    }

    pub(crate) fn with_tool(self, name: &str, version_output: &str) -> Self {
        self.add_tool(name, DEFAULT_BIN_DIR, Some(version_output));
        self
    }

    pub(crate) fn with_broken_version(self, name: &str) -> Self {
        self.add_tool(name, DEFAULT_BIN_DIR, None);
        self
    }

    pub(crate) fn with_file(self, path: &str) -> Self {
        self.files.borrow_mut().insert(PathBuf::from(path));
        self
    }

    pub(crate) fn unspawnable(self, program: &str) -> Self {
        self.unspawnable.borrow_mut().insert(program.to_string());
        self
    }

    /// Commands whose command line contains `pattern` exit with `exit_code`.
    pub(crate) fn on_command(self, pattern: &str, exit_code: i32) -> Self {
        self.rules.borrow_mut().push(FakeRule {
            pattern: pattern.to_string(),
            exit_code,
            provides: None,
        });
        self
    }

    /// Commands containing `pattern` succeed and make `tool` resolvable from then on.
    pub(crate) fn installs(self, pattern: &str, tool: &str, version_output: &str) -> Self {
        self.installs_into(pattern, tool, version_output, DEFAULT_BIN_DIR)
    }

    /// Like [`FakeSystem::installs`], but the tool lands in `dir`, which is only
    /// visible when the run's search path contains it.
    pub(crate) fn installs_into(self, pattern: &str, tool: &str, version_output: &str, dir: &str) -> Self {
        self.rules.borrow_mut().push(FakeRule {
            pattern: pattern.to_string(),
            exit_code: 0,
            provides: Some((
                tool.to_string(),
                FakeTool {
                    dir: PathBuf::from(dir),
                    version_output: Some(version_output.to_string()),
                },
            )),
        });
        self
    }

    pub(crate) fn answering(self, answers: &[bool]) -> Self {
        self.answers.borrow_mut().extend(answers.iter().copied());
        self
    }

    fn add_tool(&self, name: &str, dir: &str, version_output: Option<&str>) {
        self.tools.borrow_mut().insert(
            name.to_string(),
            FakeTool {
                dir: PathBuf::from(dir),
                version_output: version_output.map(str::to_string),
            },
        );
    }

    /// Every invocation, version queries included, in order.
    pub(crate) fn all_invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Command lines of everything that was not a version query, in order.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .filter(|invocation| self.tool_for_program(&invocation.program).is_none())
            .map(Invocation::command_line)
            .collect()
    }

    pub(crate) fn version_queries(&self) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|invocation| self.tool_for_program(&invocation.program).is_some())
            .cloned()
            .collect()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    fn tool_for_program(&self, program: &str) -> Option<FakeTool> {
        let path = Path::new(program);
        let name = path.file_name()?.to_str()?;
        let tool = self.tools.borrow().get(name).cloned()?;
        (path.parent() == Some(tool.dir.as_path())).then_some(tool)
    }
}

impl ExecutableLocator for FakeSystem {
    fn locate(&self, binary: &str, search_path: &OsStr) -> Option<PathBuf> {
        let tools = self.tools.borrow();
        let tool = tools.get(binary)?;
        let visible = tool.dir == Path::new(DEFAULT_BIN_DIR)
            || std::env::split_paths(search_path).any(|dir| dir == tool.dir);
        visible.then(|| tool.dir.join(binary))
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.borrow().contains(path)
    }
}

impl ProcessRunner for FakeSystem {
    fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        self.invocations.borrow_mut().push(invocation.clone());

        if self.unspawnable.borrow().contains(&invocation.program) {
            return Err(BootstrapError::Spawn {
                program: invocation.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            });
        }

        if let Some(tool) = self.tool_for_program(&invocation.program) {
            return Ok(match tool.version_output {
                Some(stdout) => ProcessOutput { exit_code: 0, stdout, stderr: String::new() },
                None => ProcessOutput {
                    exit_code: 1,
                    stdout: String::new(),
                    stderr: "unknown flag: --version".to_string(),
                },
            });
        }

        let command_line = invocation.command_line();
        let rule = self
            .rules
            .borrow()
            .iter()
            .find(|rule| command_line.contains(&rule.pattern))
            .cloned();

        match rule {
            Some(rule) => {
                if let Some((name, tool)) = rule.provides {
                    self.tools.borrow_mut().insert(name, tool);
                }
                Ok(ProcessOutput {
                    exit_code: rule.exit_code,
                    stdout: String::new(),
                    stderr: if rule.exit_code == 0 { String::new() } else { "installer failed".to_string() },
                })
            }
            None => Ok(ProcessOutput::default()),
        }
    }
}

impl Prompter for FakeSystem {
    fn confirm(&self, question: &str) -> bool {
        self.prompts.borrow_mut().push(question.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}
