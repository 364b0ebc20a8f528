use regnier::{Dataset, ExhaustiveSolver, Formulation, ModelConfig, RegnierProblem};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two families of records over four categorical attributes, `?` = missing.
    let data = Dataset::parse(
        "red   round  small ?\n\
         red   round  large smooth\n\
         red   oval   small smooth\n\
         green square large rough\n\
         green square ?     rough\n\
         ?     square large rough\n",
    )?;
    let problem = RegnierProblem::new(&data);

    // The exhaustive backend is exact but only handles a handful of records.
    let solver = ExhaustiveSolver::new();

    for formulation in Formulation::ALL {
        let solution = problem.solve(&ModelConfig::new(formulation), &solver)?;
        let cut = solution
            .heuristic
            .map(|h| h.cut.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{formulation:>10}: {:>3} constraints, cut {cut:>2}, objective {:>4}, groups {:?}",
            solution.num_constraints,
            solution.objective_value,
            solution.partition.groups(),
        );
    }

    Ok(())
}
