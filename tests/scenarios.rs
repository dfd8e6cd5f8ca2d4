use tursim::programs::{anbn_machine, parity_machine, ANBN_MACHINE, PARITY_MACHINE};
use tursim::{
    EngineConfig, MachineRegistry, Outcome, Status, TuringMachine, TuringMachineError,
};

fn parity(input: &str) -> TuringMachine {
    TuringMachine::new(parity_machine().validate().unwrap(), input).unwrap()
}

fn anbn(input: &str) -> TuringMachine {
    TuringMachine::new(anbn_machine().validate().unwrap(), input).unwrap()
}

#[test]
fn parity_two_ones_accepts_in_three_steps() {
    let mut machine = parity("11");

    assert_eq!(machine.run(500), Outcome::Accepted("q_accept".to_string()));
    assert_eq!(machine.step_count(), 3);
    assert_eq!(machine.head(), 2);
}

#[test]
fn parity_single_one_rejects() {
    let mut machine = parity("1");

    assert_eq!(machine.run(500), Outcome::Rejected("q_reject".to_string()));
    assert_eq!(machine.status(), Status::Rejected);
}

#[test]
fn parity_empty_input_accepts_immediately() {
    let mut machine = parity("");

    assert!(machine.step());
    assert_eq!(machine.status(), Status::Accepted);
    assert_eq!(machine.run(500), Outcome::Accepted("q_accept".to_string()));
    assert_eq!(machine.step_count(), 1);
}

#[test]
fn parity_examples() {
    let cases = [
        ("1011", false),
        ("1100", true),
        ("1101", false),
        ("0000", true),
    ];

    for (input, accepted) in cases {
        let mut machine = parity(input);
        let outcome = machine.run(500);
        assert_eq!(
            matches!(outcome, Outcome::Accepted(_)),
            accepted,
            "input '{}' gave {:?}",
            input,
            outcome
        );
    }
}

#[test]
fn anbn_balanced_input_accepts() {
    let mut machine = anbn("aabb");

    assert_eq!(machine.run(500), Outcome::Accepted("q_accept".to_string()));
    assert_eq!(machine.tape().contents(), "XXYY");
}

#[test]
fn anbn_unbalanced_input_rejects() {
    for input in ["aab", "abb", "ba", "b"] {
        let mut machine = anbn(input);
        assert!(
            matches!(machine.run(500), Outcome::Rejected(_)),
            "input '{}' should be rejected",
            input
        );
    }
}

#[test]
fn anbn_empty_input_accepts() {
    assert_eq!(
        anbn("").run(500),
        Outcome::Accepted("q_accept".to_string())
    );
}

#[test]
fn input_outside_alphabet_is_rejected_at_construction() {
    let result = TuringMachine::new(anbn_machine().validate().unwrap(), "ab ab");

    assert_eq!(
        result.unwrap_err(),
        TuringMachineError::InvalidInput {
            symbol: ' ',
            position: 2
        }
    );
}

#[test]
fn small_budget_reports_unknown_and_resumes() {
    let mut machine = anbn("aaabbb");

    assert_eq!(machine.run(5), Outcome::Unknown);
    assert_eq!(machine.status(), Status::Running);
    assert_eq!(machine.step_count(), 5);

    assert_eq!(machine.run(500), Outcome::Accepted("q_accept".to_string()));
}

#[test]
fn interactive_session() {
    let registry = MachineRegistry::with_builtins().unwrap();
    let mut machine = registry
        .engine(ANBN_MACHINE, "ab", EngineConfig::default())
        .unwrap();

    assert!(machine.step());
    assert!(machine.step());
    assert_eq!(machine.tape().contents(), "XY");
    assert_eq!(machine.head(), 0);

    assert!(machine.undo());
    assert_eq!(machine.tape().contents(), "Xb");
    assert_eq!(machine.head(), 1);
    assert_eq!(machine.state(), "q1");

    machine.reset("aabb").unwrap();
    assert!(!machine.undo());
    assert_eq!(machine.run(500), Outcome::Accepted("q_accept".to_string()));

    machine.reset("").unwrap();
    assert_eq!(machine.status(), Status::Running);
    assert_eq!(machine.state(), "q0");
}

#[test]
fn registry_machine_names() {
    let registry = MachineRegistry::with_builtins().unwrap();

    assert_eq!(registry.names(), vec![PARITY_MACHINE, ANBN_MACHINE]);
}
