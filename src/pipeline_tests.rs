#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::dataset::Dataset;
    use crate::heuristic::EdgeSign;
    use crate::model::{Formulation, ModelConfig};
    use crate::problem::RegnierProblem;
    use crate::solver::ExhaustiveSolver;
    use crate::Result;
    use proptest::prelude::*;

    fn solve_all(data: &str) -> Result<Vec<(Formulation, usize, f64, Vec<usize>)>> {
        let problem = RegnierProblem::new(&Dataset::parse(data)?);
        let solver = ExhaustiveSolver::new();
        Formulation::ALL
            .into_iter()
            .map(|f| {
                let s = problem.solve(&ModelConfig::new(f), &solver)?;
                Ok((
                    f,
                    s.num_constraints,
                    s.objective_value,
                    s.partition.canonical().into_labels(),
                ))
            })
            .collect()
    }

    #[test]
    fn identical_pair_against_outlier() -> Result<()> {
        let data = Dataset::parse("a b\na b\nx y\n")?;
        let problem = RegnierProblem::new(&data);
        let s = problem.similarity();
        assert_eq!(s.get(0, 1), 2);
        assert_eq!(s.get(0, 2), -2);
        assert_eq!(s.get(1, 2), -2);

        let solution = problem.solve(
            &ModelConfig::new(Formulation::Base),
            &ExhaustiveSolver::new(),
        )?;
        assert_eq!(solution.partition.labels(), &[0, 0, 1]);
        assert_eq!(solution.objective_value, 2.0);
        assert_eq!(solution.num_constraints, 3);
        Ok(())
    }

    #[test]
    fn fully_missing_row_has_zero_similarity() -> Result<()> {
        let data = Dataset::parse("a b c\n? ? ?\nx b c\n")?;
        let problem = RegnierProblem::new(&data);
        assert_eq!(problem.similarity().get(0, 1), 0);
        assert_eq!(problem.similarity().get(1, 2), 0);
        assert_eq!(problem.similarity().get(0, 2), 1);
        Ok(())
    }

    #[test]
    fn reduced_formulations_preserve_the_optimum() -> Result<()> {
        let two_blocks = "a a a b\na a b b\na b b b\nx y y ?\nx y z ?\n? y z z\n";
        let results = solve_all(two_blocks)?;
        let counts: Vec<usize> = results.iter().map(|r| r.1).collect();
        // base, alpha, alpha+, beta, beta+, gamma
        assert_eq!(counts, vec![60, 42, 42, 6, 6, 20]);
        for (f, _, objective, labels) in &results {
            assert_eq!(*objective, 7.0, "{f}");
            assert_eq!(labels, &vec![0, 0, 0, 1, 1, 1], "{f}");
        }
        Ok(())
    }

    #[test]
    fn positive_cut_above_zero() -> Result<()> {
        let data = "a a a\na a b\na b b\nb b b\na ? b\n";
        let problem = RegnierProblem::new(&Dataset::parse(data)?);
        let alpha_plus = problem.build_model(&ModelConfig::new(Formulation::AlphaPlus))?;
        let h = alpha_plus.heuristic().unwrap();
        assert_eq!(h.sign, EdgeSign::Positive);
        assert_eq!(h.cut, 1);
        let gamma = problem.build_model(&ModelConfig::new(Formulation::Gamma))?;
        assert_eq!(gamma.heuristic().unwrap().cut, -1);

        let results = solve_all(data)?;
        let counts: Vec<usize> = results.iter().map(|r| r.1).collect();
        assert_eq!(counts, vec![30, 28, 23, 22, 15, 8]);
        for (f, _, objective, labels) in &results {
            assert_eq!(*objective, 5.0, "{f}");
            assert_eq!(labels, &vec![0, 1, 1, 2, 1], "{f}");
        }
        Ok(())
    }

    #[test]
    fn explicit_alpha_cut_changes_the_model() -> Result<()> {
        let data = "a a a\na a b\na b b\nb b b\na ? b\n";
        let problem = RegnierProblem::new(&Dataset::parse(data)?);
        let default = problem.build_model(&ModelConfig::new(Formulation::Alpha))?;
        let raised = problem.build_model(&ModelConfig::new(Formulation::Alpha).with_cut(1))?;
        assert_eq!(default.cut(), Some(0));
        assert_eq!(raised.cut(), Some(1));
        // alpha(1) is what alpha+ resolves to on this dataset.
        assert_eq!(raised.num_constraints(), 23);
        Ok(())
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
        (3usize..6, 1usize..5).prop_flat_map(|(n, m)| {
            proptest::collection::vec(
                proptest::collection::vec(
                    proptest::sample::select(vec!["a", "b", "?"]).prop_map(String::from),
                    m,
                ),
                n,
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn every_formulation_reaches_the_base_optimum(rows in rows_strategy()) {
            let data = Dataset::from_rows(&rows, "?").unwrap();
            let problem = RegnierProblem::new(&data);
            let solver = ExhaustiveSolver::new();
            let base = problem.solve(&ModelConfig::new(Formulation::Base), &solver).unwrap();
            prop_assert_eq!(base.partition.len(), data.n_records());

            for f in Formulation::ALL {
                let s = problem.solve(&ModelConfig::new(f), &solver).unwrap();
                prop_assert!(s.num_constraints <= base.num_constraints);
                prop_assert_eq!(s.objective_value, base.objective_value, "{}", f);
                prop_assert_eq!(s.partition.len(), data.n_records());
            }
        }
    }
}
