//! Command interpreter — the read-eval state machine.
//!
//! One accepted line is one atomic transition: it may move the working
//! directory or change a single node's owner, then the machine is ready
//! for the next line. The only terminal transition is `exit`.
//!
//! Per line: tokenize on whitespace into verb + args, record the event in
//! the journal (best-effort), dispatch. Every failure — unknown path,
//! wrong arity, unrecognized verb, journal write error — is reported in
//! the result and never ends the session.

use std::time::Duration;

use chrono::Local;

use crate::journal::ActionJournal;
use crate::resolve::resolve;
use crate::session::Session;
use crate::vfs::VfsTree;

/// The result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Output for stdout.
    pub out: String,
    /// Diagnostics for stderr.
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// True if the command succeeded.
    pub fn ok(&self) -> bool {
        self.code == 0
    }
}

/// What the loop should do after one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the result and read the next line.
    Continue(ExecResult),
    /// Print the result, then end the session with success status.
    Exit(ExecResult),
}

/// The interpreter: owns the tree, the session, and the journal.
pub struct Interpreter {
    tree: VfsTree,
    session: Session,
    journal: ActionJournal,
}

impl Interpreter {
    /// Create an interpreter over a freshly built tree.
    pub fn new(tree: VfsTree, journal: ActionJournal) -> Self {
        Self {
            tree,
            session: Session::new(),
            journal,
        }
    }

    /// The prompt for the next input line.
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// The session state (for inspection in tests).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The virtual tree (for inspection in tests).
    pub fn tree(&self) -> &VfsTree {
        &self.tree
    }

    /// Execute one input line.
    ///
    /// Empty or whitespace-only input re-loops without dispatch and
    /// without a journal entry. Every other line is journaled exactly
    /// once, then dispatched; a journal write failure is reported in the
    /// result's `err` but the command still runs.
    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Outcome::Continue(ExecResult::success(""));
        };
        let args: Vec<&str> = tokens.collect();

        let sink_warning = self
            .journal
            .record(verb, &args)
            .err()
            .map(|e| format!("warning: could not record action: {e:#}"));

        let mut outcome = match verb {
            "ls" => Outcome::Continue(self.ls(&args)),
            "cd" => Outcome::Continue(self.cd(&args)),
            "chown" => Outcome::Continue(self.chown(&args)),
            "date" => Outcome::Continue(Self::date()),
            "uptime" => Outcome::Continue(self.uptime()),
            "exit" => Outcome::Exit(ExecResult::success("Exiting...")),
            other => Outcome::Continue(ExecResult::failure(
                1,
                format!("unrecognized command: \"{other}\""),
            )),
        };

        if let Some(warning) = sink_warning {
            let result = match &mut outcome {
                Outcome::Continue(result) | Outcome::Exit(result) => result,
            };
            if result.err.is_empty() {
                result.err = warning;
            } else {
                result.err = format!("{warning}\n{}", result.err);
            }
        }
        outcome
    }

    /// `ls [path?]` — list a directory (name + owner per child, sorted by
    /// name) or print a file's bare name.
    fn ls(&self, args: &[&str]) -> ExecResult {
        let target = match args.first() {
            Some(path) => resolve(path, &self.session.cwd()),
            None => self.session.cwd(),
        };
        let Some(node) = self.tree.lookup(&target) else {
            return ExecResult::failure(
                1,
                format!("ls: cannot access '{target}': No such file or directory"),
            );
        };
        match node.children() {
            None => ExecResult::success(node.name.clone()),
            Some(children) => {
                let lines: Vec<String> = children
                    .values()
                    .map(|child| format!("{}    {}", child.name, child.owner))
                    .collect();
                ExecResult::success(lines.join("\n"))
            }
        }
    }

    /// `cd [path?]` — move the working directory.
    ///
    /// No argument or `/` resets to root; the bare `..` verb pops one
    /// level (no-op at root). Anything else is resolved lexically and
    /// must name an existing directory. Note that `..` embedded in a
    /// path argument is a literal child name, not a "go up" token.
    fn cd(&mut self, args: &[&str]) -> ExecResult {
        let Some(&target) = args.first() else {
            self.session.reset();
            return ExecResult::success("");
        };
        match target {
            "/" => {
                self.session.reset();
                ExecResult::success("")
            }
            ".." => {
                self.session.pop();
                ExecResult::success("")
            }
            _ => {
                let canonical = resolve(target, &self.session.cwd());
                match self.tree.lookup(&canonical) {
                    Some(node) if node.is_dir() => {
                        self.session.enter(&canonical);
                        ExecResult::success("")
                    }
                    _ => ExecResult::failure(
                        1,
                        format!("cd: cannot change to '{target}': No such directory"),
                    ),
                }
            }
        }
    }

    /// `chown <new_owner> <path>` — set a node's owner.
    fn chown(&mut self, args: &[&str]) -> ExecResult {
        let &[new_owner, path] = args else {
            return ExecResult::failure(1, "usage: chown <new_owner> <path>");
        };
        let canonical = resolve(path, &self.session.cwd());
        match self.tree.lookup_mut(&canonical) {
            Some(node) => {
                node.owner = new_owner.to_string();
                ExecResult::success(format!("owner of '{path}' changed to '{new_owner}'"))
            }
            None => ExecResult::failure(
                1,
                format!("chown: cannot change owner of '{path}': No such file or directory"),
            ),
        }
    }

    /// `date` — current local date-time in a fixed, sortable format.
    fn date() -> ExecResult {
        ExecResult::success(Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
    }

    /// `uptime` — elapsed time since session start.
    fn uptime(&self) -> ExecResult {
        ExecResult::success(format!("Uptime: {}", format_uptime(self.session.uptime())))
    }
}

/// Render a duration as days/hours/minutes/seconds.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> VfsTree {
        VfsTree::from_entries([
            ("documents", true),
            ("documents/file1.txt", false),
            ("documents/file2.txt", false),
            ("images", true),
            ("images/photo1.png", false),
        ])
    }

    fn make_interpreter() -> (Interpreter, TempDir) {
        let dir = TempDir::new().unwrap();
        let journal = ActionJournal::new(dir.path().join("actions.json"));
        (Interpreter::new(sample_tree(), journal), dir)
    }

    fn expect_continue(outcome: Outcome) -> ExecResult {
        match outcome {
            Outcome::Continue(result) => result,
            Outcome::Exit(_) => panic!("unexpected exit"),
        }
    }

    #[test]
    fn ls_root_lists_children_sorted_with_owner() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("ls"));
        assert!(result.ok());
        assert_eq!(result.out, "documents    root\nimages    root");
    }

    #[test]
    fn ls_of_a_file_prints_just_its_name() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("ls /documents/file1.txt"));
        assert!(result.ok());
        assert_eq!(result.out, "file1.txt");
    }

    #[test]
    fn ls_missing_path_names_the_literal_target() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("ls /nonexistent"));
        assert!(!result.ok());
        assert_eq!(
            result.err,
            "ls: cannot access '/nonexistent': No such file or directory"
        );
        // No state change
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn ls_relative_to_cwd() {
        let (mut interp, _dir) = make_interpreter();
        expect_continue(interp.dispatch("cd documents"));
        let result = expect_continue(interp.dispatch("ls"));
        assert_eq!(result.out, "file1.txt    root\nfile2.txt    root");
    }

    #[test]
    fn cd_moves_and_updates_prompt() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("cd documents"));
        assert!(result.ok());
        assert_eq!(interp.prompt(), "/documents$ ");

        // lookup(resolve(p, cwd)) after a successful cd finds the same node
        let node = interp.tree().lookup(&interp.session().cwd()).unwrap();
        assert_eq!(node.name, "documents");
    }

    #[test]
    fn cd_without_args_resets_to_root() {
        let (mut interp, _dir) = make_interpreter();
        expect_continue(interp.dispatch("cd documents"));
        expect_continue(interp.dispatch("cd"));
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn cd_slash_resets_to_root() {
        let (mut interp, _dir) = make_interpreter();
        expect_continue(interp.dispatch("cd documents"));
        expect_continue(interp.dispatch("cd /"));
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn cd_dot_dot_at_root_is_a_no_op() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("cd .."));
        assert!(result.ok());
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn cd_dot_dot_pops_one_level() {
        let (mut interp, _dir) = make_interpreter();
        expect_continue(interp.dispatch("cd documents"));
        expect_continue(interp.dispatch("cd .."));
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn cd_into_a_file_fails() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("cd documents/file1.txt"));
        assert!(!result.ok());
        assert!(result.err.contains("documents/file1.txt"));
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn cd_missing_directory_names_the_raw_argument() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("cd nowhere"));
        assert_eq!(
            result.err,
            "cd: cannot change to 'nowhere': No such directory"
        );
    }

    #[test]
    fn dot_dot_inside_an_argument_is_literal() {
        let (mut interp, _dir) = make_interpreter();
        // "documents/../images" looks up ".." as a literal child of
        // documents, which does not exist.
        let result = expect_continue(interp.dispatch("cd documents/../images"));
        assert!(!result.ok());
        assert_eq!(interp.session().cwd(), "/");
    }

    #[test]
    fn chown_round_trip_shows_in_ls() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("chown alice /documents/file1.txt"));
        assert!(result.ok());
        assert_eq!(
            result.out,
            "owner of '/documents/file1.txt' changed to 'alice'"
        );

        let listing = expect_continue(interp.dispatch("ls /documents"));
        assert_eq!(listing.out, "file1.txt    alice\nfile2.txt    root");
    }

    #[test]
    fn chown_wrong_arity_prints_usage() {
        let (mut interp, _dir) = make_interpreter();
        for line in ["chown", "chown alice", "chown alice a b"] {
            let result = expect_continue(interp.dispatch(line));
            assert_eq!(result.err, "usage: chown <new_owner> <path>");
        }
    }

    #[test]
    fn chown_missing_target_is_reported() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("chown alice /nope"));
        assert_eq!(
            result.err,
            "chown: cannot change owner of '/nope': No such file or directory"
        );
    }

    #[test]
    fn date_is_fixed_sortable_format() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("date"));
        assert!(result.ok());
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(result.out.len(), 19);
        assert_eq!(&result.out[4..5], "-");
        assert_eq!(&result.out[13..14], ":");
    }

    #[test]
    fn uptime_reports_elapsed_units() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("uptime"));
        assert!(result.ok());
        assert!(result.out.starts_with("Uptime: "));
        assert!(result.out.ends_with('s'));
    }

    #[test]
    fn format_uptime_breaks_down_units() {
        let elapsed = Duration::from_secs(86_400 + 3_600 * 2 + 60 * 3 + 4);
        assert_eq!(format_uptime(elapsed), "1d 2h 3m 4s");
        assert_eq!(format_uptime(Duration::ZERO), "0d 0h 0m 0s");
    }

    #[test]
    fn exit_is_the_terminal_transition() {
        let (mut interp, _dir) = make_interpreter();
        match interp.dispatch("exit") {
            Outcome::Exit(result) => {
                assert!(result.ok());
                assert_eq!(result.out, "Exiting...");
            }
            Outcome::Continue(_) => panic!("exit must end the session"),
        }
    }

    #[test]
    fn unrecognized_verb_is_recoverable() {
        let (mut interp, _dir) = make_interpreter();
        let result = expect_continue(interp.dispatch("frobnicate now"));
        assert_eq!(result.err, "unrecognized command: \"frobnicate\"");

        // The session is still usable
        let result = expect_continue(interp.dispatch("ls"));
        assert!(result.ok());
    }

    #[test]
    fn blank_input_does_not_dispatch_or_journal() {
        let (mut interp, dir) = make_interpreter();
        expect_continue(interp.dispatch(""));
        expect_continue(interp.dispatch("   \t  "));

        let journal = ActionJournal::new(dir.path().join("actions.json"));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn every_accepted_line_is_journaled_in_order() {
        let (mut interp, dir) = make_interpreter();
        interp.dispatch("ls /documents");
        interp.dispatch("cd documents");
        interp.dispatch("bogus");
        interp.dispatch("exit");

        let journal = ActionJournal::new(dir.path().join("actions.json"));
        let entries = journal.entries();
        let commands: Vec<&str> = entries.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, ["ls", "cd", "bogus", "exit"]);
        assert_eq!(entries[0].arguments, ["/documents"]);
    }

    #[test]
    fn journal_failure_is_reported_but_command_runs() {
        let journal = ActionJournal::new("/nonexistent-dir/deeper/actions.json");
        let mut interp = Interpreter::new(sample_tree(), journal);

        let result = expect_continue(interp.dispatch("cd documents"));
        assert!(result.err.starts_with("warning: could not record action"));
        // The cd itself still took effect
        assert_eq!(interp.session().cwd(), "/documents");
    }
}
