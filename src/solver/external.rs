//! A solver binary, run as a child process.
//!
//! The formula is written to the standard input of the process as DIMACS, and the standard output of the process is read as a [solution](crate::io::solution).
//! Most solvers, e.g. `kissat` or `cadical`, read from standard input and write the competition format by default.
//!
//! If the output has no status line, the exit code is used instead, by the usual convention of 10 for satisfiable and 20 for unsatisfiable.
//! Though, a satisfiable result without a model is a failure, as there is nothing to decode.

use std::{
    io::Read,
    path::PathBuf,
    process::{Command, Stdio},
    time::{Duration, Instant},
};

use crate::{
    io::{dimacs, solution},
    misc::log::targets::{self},
    solver::{CancelToken, SolveReport, Solver},
    structures::clause::Cnf,
    types::err::{ErrorKind, SolverError},
};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Clone, Debug)]
pub struct External {
    program: PathBuf,
    args: Vec<String>,
    time_limit: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl External {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        External {
            program: program.into(),
            args: Vec::default(),
            time_limit: None,
            cancel: None,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kills the process once the time limit has passed.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Kills the process once the token is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Solver for External {
    fn solve(&mut self, cnf: &Cnf) -> Result<SolveReport, SolverError> {
        let process_error = |msg: String| SolverError::Process(format!("{}: {msg}", self.program.display()));

        log::info!(target: targets::SOLVER, "Running {} {:?}", self.program.display(), self.args);
        let started = Instant::now();
        let deadline = self.time_limit.map(|limit| started + limit);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| process_error(e.to_string()))?;

        // Output is read on a separate thread, so a process blocked on a full pipe does not stall the wait below.
        let Some(mut stdout) = child.stdout.take() else {
            return Err(process_error("no standard output".to_string()));
        };
        let reader = std::thread::spawn(move || {
            let mut output = String::default();
            stdout.read_to_string(&mut output).map(|_| output)
        });

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = dimacs::write_dimacs(&mut stdin, cnf, &[]) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(process_error(e.to_string()));
            }
        }

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,

                Ok(None) => {
                    if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SolverError::Cancelled);
                    }
                    if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                        let _ = child.kill();
                        let _ = child.wait();
                        log::info!(target: targets::SOLVER, "Killed after {:.2?}", started.elapsed());
                        return Err(SolverError::TimedOut);
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }

                Err(e) => return Err(process_error(e.to_string())),
            }
        };

        let output = match reader.join() {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(process_error(e.to_string())),
            Err(_) => return Err(SolverError::Crashed("output reader panicked".to_string())),
        };

        log::info!(target: targets::SOLVER, "Exited with {status} after {:.2?}", started.elapsed());

        match solution::read_solution(output.as_bytes()) {
            Ok(report) => Ok(report),
            Err(ErrorKind::Solver(e)) => Err(e),
            Err(_) => match status.code() {
                Some(20) => Ok(SolveReport::Unsatisfiable),
                Some(10) => Err(process_error("satisfiable, without a model".to_string())),
                _ => Err(process_error(format!("no result, {status}"))),
            },
        }
    }

    fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    fn sh(script: &str) -> External {
        External::new("sh").with_args(["-c", script])
    }

    #[test]
    fn competition_output() {
        let mut solver = sh("cat > /dev/null; printf 's SATISFIABLE\\nv 1 -2 0\\n'; exit 10");
        let mut cnf = Cnf::new(2);
        cnf.add_clause(vec![1]);

        let SolveReport::Satisfiable(model) = solver.solve(&cnf).unwrap() else {
            panic!("satisfiable");
        };
        assert!(model.is_true(1));
        assert!(!model.is_true(2));
    }

    #[test]
    fn exit_code_without_status() {
        let mut solver = sh("cat > /dev/null; exit 20");
        assert_eq!(solver.solve(&Cnf::new(1)), Ok(SolveReport::Unsatisfiable));

        let mut solver = sh("cat > /dev/null; exit 3");
        assert!(matches!(solver.solve(&Cnf::new(1)), Err(SolverError::Process(_))));
    }

    #[test]
    fn killed_on_time_limit() {
        let mut solver = sh("cat > /dev/null; sleep 5").with_time_limit(Some(Duration::from_millis(100)));
        assert_eq!(solver.solve(&Cnf::new(1)), Err(SolverError::TimedOut));
    }

    #[test]
    fn killed_on_cancel() {
        let token = CancelToken::default();
        let mut solver = sh("cat > /dev/null; sleep 5");
        solver.set_cancel_token(token.clone());

        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            token.cancel();
        });
        assert_eq!(solver.solve(&Cnf::new(1)), Err(SolverError::Cancelled));
        let _ = canceller.join();
    }

    #[test]
    fn missing_binary() {
        let mut solver = External::new("/nonexistent/solver");
        assert!(matches!(solver.solve(&Cnf::new(1)), Err(SolverError::Process(_))));
    }
}
