//! LP text export.
//!
//! Writes the model in the CPLEX LP layout most MILP solvers read:
//!
//! ```text
//! \ENCODING=ISO-8859-1
//! \Problem name: alpha model
//!
//! Maximize
//!  obj:
//!  + 2 v.0.1 - 2 v.0.2 - 2 v.1.2
//! Subject To
//!  c1: v.0.1 + v.1.2 - v.0.2 <= 1
//!  c2: v.0.1 - v.1.2 + v.0.2 <= 1
//!
//! Bounds
//!  0 <= v.0.1 <= 1
//!  ...
//!
//! Binaries
//!  v.0.1 v.0.2 v.1.2
//! End
//! ```
//!
//! The export is diagnostic; nothing in this crate reads it back.

use super::variables::{VarKind, VarName};
use super::Model;
use crate::error::Result;
use std::io::Write;

const TERMS_PER_LINE: usize = 4;

/// Write `model` in LP format.
pub fn write_lp<W: Write>(model: &Model, out: &mut W) -> Result<()> {
    writeln!(out, "\\ENCODING=ISO-8859-1")?;
    writeln!(out, "\\Problem name: {} model", model.formulation())?;
    writeln!(out)?;

    writeln!(out, "Maximize")?;
    writeln!(out, " obj:")?;
    for chunk in model.variables().chunks(TERMS_PER_LINE) {
        for v in chunk {
            let sign = if v.objective >= 0 { '+' } else { '-' };
            write!(out, " {sign} {} {}", v.objective.unsigned_abs(), v.name())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Subject To")?;
    for (idx, c) in model.constraints().iter().enumerate() {
        write!(out, " c{}:", idx + 1)?;
        let (i, j, k) = c.triple;
        let names = [VarName::new(i, j), VarName::new(j, k), VarName::new(i, k)];
        for (pos, (name, &(_, coef))) in names.iter().zip(&c.terms).enumerate() {
            match (pos, coef >= 0) {
                (0, true) => write!(out, " {name}")?,
                (0, false) => write!(out, " - {name}")?,
                (_, true) => write!(out, " + {name}")?,
                (_, false) => write!(out, " - {name}")?,
            }
        }
        writeln!(out, " <= {}", c.rhs)?;
    }

    writeln!(out)?;
    writeln!(out, "Bounds")?;
    for v in model.variables() {
        writeln!(out, " {} <= {} <= {}", v.lower, v.name(), v.upper)?;
    }

    if model.kind() == VarKind::Binary && !model.variables().is_empty() {
        writeln!(out)?;
        writeln!(out, "Binaries")?;
        for chunk in model.variables().chunks(TERMS_PER_LINE) {
            for v in chunk {
                write!(out, " {}", v.name())?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "End")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::dataset::Dataset;
    use crate::model::{Formulation, Model, ModelConfig};
    use crate::similarity::SimilarityMatrix;

    fn model(config: ModelConfig) -> Model {
        let s = SimilarityMatrix::from_dataset(&Dataset::parse("a b\na b\nx y\n").unwrap());
        Model::build(&s, &config).unwrap()
    }

    #[test]
    fn exports_base_model() {
        let lp = model(ModelConfig::new(Formulation::Base)).to_lp_string();
        let expected = "\
\\ENCODING=ISO-8859-1
\\Problem name: base model

Maximize
 obj:
 + 2 v.0.1 - 2 v.0.2 - 2 v.1.2
Subject To
 c1: v.0.1 + v.1.2 - v.0.2 <= 1
 c2: v.0.1 - v.1.2 + v.0.2 <= 1
 c3: - v.0.1 + v.1.2 + v.0.2 <= 1

Bounds
 0 <= v.0.1 <= 1
 0 <= v.0.2 <= 1
 0 <= v.1.2 <= 1

Binaries
 v.0.1 v.0.2 v.1.2
End
";
        assert_eq!(lp, expected);
    }

    #[test]
    fn relaxation_has_no_binaries_section() {
        let lp = model(ModelConfig::new(Formulation::Gamma).with_relaxation(true)).to_lp_string();
        assert!(lp.contains("\\Problem name: gamma model"));
        assert!(!lp.contains("Binaries"));
        assert!(lp.ends_with("End\n"));
    }
}
