//! Provides an example of how to use Reverend to perform inference on a Bayesian Network.
//!
//! Reads the burglary network from `demos/burglary.bn` (or the file given as the first argument)
//! and asks who is likely to be breaking in when both neighbours call.

extern crate reverend;

use reverend as r;
use r::ConditionalInferenceEngine;

use std::env;

fn main() -> r::Result<()> {
    /////////////////////////////////////////////////////
    // Step 1: Read Model
    let path = env::args()
                   .nth(1)
                   .unwrap_or_else(|| String::from(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/burglary.bn")));
    let model = r::read_network(&path)?;

    println!("Nodes, in topological order: {:?}", model.order());

    /////////////////////////////////////////////////////
    // Step 2: Compile some evidence
    let evidence = r::Assignment::from_pairs(&[("JohnCalls", "True"), ("MaryCalls", "True")]);

    /////////////////////////////////////////////////////
    // Step 3: Run a Conditional Query with each engine
    report("enumeration", &mut r::EnumerationEngine::new(&model), &evidence);
    report("rejection sampling", &mut r::RejectionSamplingEngine::new(&model, 1_000_000), &evidence);
    report("likelihood weighting", &mut r::ImportanceSamplingEngine::new(&model, 100_000), &evidence);
    report("gibbs sampling", &mut r::McmcEngine::new(&model, 1_000, 20_000), &evidence);

    /////////////////////////////////////////////////////
    // Step 4: Some joint probabilities
    let quiet = r::Assignment::from_pairs(&[("Burglary", "False"), ("Earthquake", "False"), ("Alarm", "False")]);
    println!("P(no burglary, no earthquake, no alarm) = {:.4}", model.joint_probability(&quiet)?);

    let calls = model.prior_sample(10_000)?
                     .iter()
                     .filter(|s| s.get("JohnCalls") == Some("True"))
                     .count();
    println!("John called in {} of 10000 simulated days", calls);

    Ok(())
}

fn report(name: &str, engine: &mut dyn ConditionalInferenceEngine, evidence: &r::Assignment) {
    println!("P(Burglary | JohnCalls = True, MaryCalls = True) by {}:", name);

    match engine.infer("Burglary", evidence) {
        Ok(p) => println!("{}", p),
        Err(e) => println!("failed: {}", e)
    }
}
