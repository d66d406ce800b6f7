/*!
Reading and writing solver results.

Results are read in the format of the SAT competitions, as written by most solvers to standard output:

```none
c any comments
s SATISFIABLE
v 1 -2 3 -4
v 5 0
```

A status of `UNSATISFIABLE` has no value lines.

The result files written by MiniSat, with a first line `SAT`, `UNSAT`, or `INDET` followed by the model as a single line of literals, are read as well.
*/

use std::io::{BufRead, Write};

use crate::{
    misc::log::targets::{self},
    solver::SolveReport,
    structures::{assignment::Assignment, clause::Literal},
    types::err::{self, ErrorKind},
};

/// Literals written per value line.
const VALUES_PER_LINE: usize = 10;

/// Writes a report in the competition format.
pub fn write_solution(writer: &mut impl Write, report: &SolveReport) -> Result<(), ErrorKind> {
    match report {
        SolveReport::Unsatisfiable => writeln!(writer, "s UNSATISFIABLE")?,

        SolveReport::Satisfiable(model) => {
            writeln!(writer, "s SATISFIABLE")?;
            let literals = model.literals().collect::<Vec<_>>();
            for chunk in literals.chunks(VALUES_PER_LINE) {
                write!(writer, "v")?;
                for literal in chunk {
                    write!(writer, " {literal}")?;
                }
                writeln!(writer)?;
            }
            writeln!(writer, "v 0")?;
        }
    }
    Ok(())
}

enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

/// Reads a report.
///
/// ```rust
/// # use satplan::io::solution::read_solution;
/// # use satplan::solver::SolveReport;
/// let output = b"c from some solver\ns SATISFIABLE\nv -1 2\nv 3 0\n";
/// let SolveReport::Satisfiable(model) = read_solution(output.as_slice()).unwrap() else {
///     panic!("expected a model");
/// };
/// assert!(model.is_true(2));
/// assert_eq!(model.value_of(1), Some(false));
///
/// let output = b"UNSAT\n";
/// assert_eq!(read_solution(output.as_slice()).unwrap(), SolveReport::Unsatisfiable);
/// ```
pub fn read_solution(reader: impl BufRead) -> Result<SolveReport, ErrorKind> {
    let mut status = None;
    let mut literals: Vec<Literal> = Vec::default();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        let values = match line.split_once(char::is_whitespace) {
            _ if line.is_empty() || line.starts_with('c') => continue,

            Some(("s", result)) => {
                status = Some(read_status(result.trim())?);
                continue;
            }

            Some(("v", values)) => values,

            _ => match status {
                None => {
                    status = Some(read_status(line)?);
                    continue;
                }
                // The model line of a MiniSat result file.
                Some(_) => line,
            },
        };

        for item in values.split_whitespace() {
            match item.parse::<Literal>() {
                Ok(0) => {}
                Ok(literal) => literals.push(literal),
                Err(_) => return Err(err::ParseError::SolutionStatus.into()),
            }
        }
    }

    match status {
        Some(Status::Satisfiable) => {
            log::debug!(target: targets::SOLVER, "Read a model of {} literals", literals.len());
            Ok(SolveReport::Satisfiable(Assignment::from_literals(literals)))
        }
        Some(Status::Unsatisfiable) => Ok(SolveReport::Unsatisfiable),
        Some(Status::Unknown) => {
            Err(err::SolverError::Process("the solver reported an unknown result".to_string()).into())
        }
        None => Err(err::ParseError::SolutionStatus.into()),
    }
}

fn read_status(status: &str) -> Result<Status, ErrorKind> {
    match status {
        "SATISFIABLE" | "SAT" => Ok(Status::Satisfiable),
        "UNSATISFIABLE" | "UNSAT" => Ok(Status::Unsatisfiable),
        "UNKNOWN" | "INDET" | "INDETERMINATE" => Ok(Status::Unknown),
        _ => Err(err::ParseError::SolutionStatus.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minisat_result_file() {
        let report = read_solution(b"SAT\n1 -2 3 0\n".as_slice()).unwrap();
        assert_eq!(
            report,
            SolveReport::Satisfiable(Assignment::from_literals([1, -2, 3]))
        );
    }

    #[test]
    fn written_reports_read_back() {
        let model = Assignment::from_literals((1..=23).map(|v| if v % 3 == 0 { -v } else { v }));
        let report = SolveReport::Satisfiable(model);

        let mut buffer = Vec::default();
        write_solution(&mut buffer, &report).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("s SATISFIABLE\nv 1 2 -3"));
        assert_eq!(text.lines().count(), 1 + 3 + 1);

        assert_eq!(read_solution(buffer.as_slice()).unwrap(), report);
    }

    #[test]
    fn unknown_and_missing_status() {
        assert_eq!(
            read_solution(b"s UNKNOWN\n".as_slice()),
            Err(ErrorKind::Solver(err::SolverError::Process(
                "the solver reported an unknown result".to_string()
            )))
        );
        assert_eq!(
            read_solution(b"c nothing\n".as_slice()),
            Err(ErrorKind::Parse(err::ParseError::SolutionStatus))
        );
    }
}
