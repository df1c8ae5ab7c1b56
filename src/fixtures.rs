//! Networks shared by the tests of several modules

use init::Initialization;
use model::network::{BayesNet, BayesNetBuilder};

pub const TF: [&str; 2] = ["True", "False"];

/// A -> B with P(A) = 0.5, P(B | A) = 0.9, P(B | ~A) = 0.2
pub fn two_node() -> BayesNet {
    BayesNetBuilder::new()
        .with_node("A", &TF)
        .with_node("B", &TF)
        .with_edge("A", "B")
        .with_cpt_row("A", &[], &[("True", 0.5), ("False", 0.5)])
        .with_cpt_row("B", &[("A", "True")], &[("True", 0.9), ("False", 0.1)])
        .with_cpt_row("B", &[("A", "False")], &[("True", 0.2), ("False", 0.8)])
        .build()
        .unwrap()
}

/// The student network of Koller & Friedman Figure 3.4
///
/// Difficulty -> Grade <- Intelligence, Grade -> Letter, Intelligence -> SAT
pub fn student() -> BayesNet {
    let grade = array![[ [0.3, 0.4, 0.3], [0.05, 0.25, 0.7] ],
                       [ [0.9, 0.08, 0.02], [0.5, 0.3, 0.2] ]].into_dyn();
    let letter = array![ [0.1, 0.9], [0.4, 0.6], [0.99, 0.01] ].into_dyn();
    let sat = array![ [0.95, 0.05], [0.2, 0.8] ].into_dyn();

    BayesNetBuilder::new()
        .with_node("Difficulty", &["easy", "hard"])
        .with_node("Intelligence", &["low", "high"])
        .with_node("Grade", &["A", "B", "C"])
        .with_node("Letter", &["weak", "strong"])
        .with_node("SAT", &["low", "high"])
        .with_edge("Intelligence", "Grade")
        .with_edge("Difficulty", "Grade")
        .with_edge("Grade", "Letter")
        .with_edge("Intelligence", "SAT")
        .with_table("Difficulty", Initialization::Binomial(0.6))
        .with_table("Intelligence", Initialization::Binomial(0.7))
        .with_table("Grade", Initialization::Table(grade))
        .with_table("Letter", Initialization::Table(letter))
        .with_table("SAT", Initialization::Table(sat))
        .build()
        .unwrap()
}

/// The burglary network of Russell & Norvig Figure 14.2
pub fn burglary() -> BayesNet {
    BayesNetBuilder::new()
        .with_node("Burglary", &TF)
        .with_node("Earthquake", &TF)
        .with_node("Alarm", &TF)
        .with_node("JohnCalls", &TF)
        .with_node("MaryCalls", &TF)
        .with_edge("Burglary", "Alarm")
        .with_edge("Earthquake", "Alarm")
        .with_edge("Alarm", "JohnCalls")
        .with_edge("Alarm", "MaryCalls")
        .with_cpt_row("Burglary", &[], &[("True", 0.001), ("False", 0.999)])
        .with_cpt_row("Earthquake", &[], &[("True", 0.002), ("False", 0.998)])
        .with_cpt_row("Alarm", &[("Burglary", "True"), ("Earthquake", "True")], &[("True", 0.95), ("False", 0.05)])
        .with_cpt_row("Alarm", &[("Burglary", "True"), ("Earthquake", "False")], &[("True", 0.94), ("False", 0.06)])
        .with_cpt_row("Alarm", &[("Burglary", "False"), ("Earthquake", "True")], &[("True", 0.29), ("False", 0.71)])
        .with_cpt_row("Alarm", &[("Burglary", "False"), ("Earthquake", "False")], &[("True", 0.001), ("False", 0.999)])
        .with_cpt_row("JohnCalls", &[("Alarm", "True")], &[("True", 0.9), ("False", 0.1)])
        .with_cpt_row("JohnCalls", &[("Alarm", "False")], &[("True", 0.05), ("False", 0.95)])
        .with_cpt_row("MaryCalls", &[("Alarm", "True")], &[("True", 0.7), ("False", 0.3)])
        .with_cpt_row("MaryCalls", &[("Alarm", "False")], &[("True", 0.01), ("False", 0.99)])
        .build()
        .unwrap()
}
