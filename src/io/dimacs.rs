/*!
Reading and writing formulas in the DIMACS CNF format.

# Overview

A DIMACS file is a sequence of comment lines, a problem line, and clauses:

```none
c horizon 4
p cnf 3 2
 1 -2 0
-1  3 0
```

Each clause is a whitespace separated list of literals terminated by `0`, and may span lines.

When writing, comment lines are written first, then the problem line with exact counts, then one clause per line, in the order of the formula.
When reading, comment lines are skipped wherever they occur, as is everything after a line beginning `%`.
The problem line is read for the variable count, and every literal must fall within that count.
A clause count on the problem line which differs from the clauses read is noted in the log, but is otherwise ignored.
*/

use std::io::{BufRead, Write};

use crate::{
    misc::log::targets::{self},
    structures::clause::{Clause, Cnf, Literal},
    types::err::{self, ErrorKind},
};

/// Writes a formula, with each line of the preamble written as a comment.
///
/// ```rust
/// # use satplan::io::dimacs::write_dimacs;
/// # use satplan::structures::clause::Cnf;
/// let mut cnf = Cnf::new(2);
/// cnf.add_clause(vec![1, -2]);
/// cnf.add_clause(vec![2]);
///
/// let mut buffer = Vec::default();
/// write_dimacs(&mut buffer, &cnf, &["horizon 1".to_string()]).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "c horizon 1\np cnf 2 2\n1 -2 0\n2 0\n");
/// ```
pub fn write_dimacs(
    writer: &mut impl Write,
    cnf: &Cnf,
    preamble: &[String],
) -> Result<(), ErrorKind> {
    let mut writer = std::io::BufWriter::new(writer);

    for line in preamble {
        writeln!(writer, "c {line}")?;
    }

    writeln!(writer, "p cnf {} {}", cnf.var_count, cnf.len())?;

    for clause in &cnf.clauses {
        for literal in clause {
            write!(writer, "{literal} ")?;
        }
        writeln!(writer, "0")?;
    }

    writer.flush()?;

    log::info!(target: targets::DIMACS, "Wrote {} variables and {} clauses", cnf.var_count, cnf.len());
    Ok(())
}

/// Reads a formula.
///
/// If no problem line is present, the variable count is taken to be the largest variable of any literal.
///
/// ```rust
/// # use satplan::io::dimacs::read_dimacs;
/// let dimacs = b"
/// c a comment
/// p cnf 3 2
///  1 -2
///     3 0
/// c another comment
/// -1 0
/// ";
///
/// let cnf = read_dimacs(dimacs.as_slice()).unwrap();
/// assert_eq!(cnf.var_count, 3);
/// assert_eq!(cnf.clauses, vec![vec![1, -2, 3], vec![-1]]);
/// ```
#[allow(unused_labels)]
pub fn read_dimacs(mut reader: impl BufRead) -> Result<Cnf, ErrorKind> {
    let mut buffer = String::with_capacity(1024);
    let mut line_counter = 0;

    let mut declared: Option<(usize, usize)> = None;
    let mut clauses: Vec<Clause> = Vec::default();
    let mut clause_buffer: Clause = Vec::default();
    let mut largest_variable = 0;

    // first phase, read until the formula begins
    'preamble_loop: loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => line_counter += 1,
            Err(e) => return Err(ErrorKind::from(e)),
        }

        match buffer.trim_start().chars().next() {
            None | Some('c') => continue,

            Some('p') => {
                let mut problem_details = buffer.split_whitespace().skip(1);
                if problem_details.next() != Some("cnf") {
                    return Err(err::ParseError::ProblemSpecification.into());
                }

                let mut count = || -> Result<usize, ErrorKind> {
                    problem_details
                        .next()
                        .and_then(|string| string.parse().ok())
                        .ok_or(ErrorKind::from(err::ParseError::ProblemSpecification))
                };
                let variables = count()?;
                let clause_count = count()?;

                log::debug!(target: targets::DIMACS, "Expecting {variables} variables and {clause_count} clauses");
                declared = Some((variables, clause_count));
                buffer.clear();
                break;
            }

            // A formula without a problem line.
            _ => break,
        }
    }

    // second phase, read until the formula ends
    // the buffer may hold the first line of the formula from the first phase
    'formula_loop: loop {
        if buffer.is_empty() {
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(e) => return Err(ErrorKind::from(e)),
            }
        }

        match buffer.trim_start().chars().next() {
            Some('%') => break 'formula_loop,
            Some('c') | None => {}
            Some('p') => return Err(err::ParseError::ProblemSpecification.into()),
            _ => {
                for item in buffer.split_whitespace() {
                    let literal = match item.parse::<Literal>() {
                        Ok(literal) => literal,
                        Err(_) => return Err(err::ParseError::Literal(line_counter).into()),
                    };

                    match literal {
                        0 => clauses.push(std::mem::take(&mut clause_buffer)),
                        _ => {
                            let variable = literal.unsigned_abs() as usize;
                            if let Some((bound, _)) = declared {
                                if variable > bound {
                                    return Err(err::ParseError::VariableBound(line_counter).into());
                                }
                            }
                            largest_variable = largest_variable.max(variable);
                            clause_buffer.push(literal);
                        }
                    }
                }
            }
        }

        buffer.clear();
    }

    if !clause_buffer.is_empty() {
        return Err(err::ParseError::UnterminatedClause.into());
    }

    let var_count = match declared {
        Some((variables, clause_count)) => {
            if clause_count != clauses.len() {
                log::warn!(target: targets::DIMACS, "Expected {clause_count} clauses, read {}", clauses.len());
            }
            variables
        }
        None => largest_variable,
    };

    log::info!(target: targets::DIMACS, "Read {var_count} variables and {} clauses", clauses.len());
    Ok(Cnf { var_count, clauses })
}
