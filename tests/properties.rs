use proptest::prelude::*;
use tursim::programs::anbn_machine;
use tursim::{view, Status, Tape, TuringMachine};

fn machine(input: &str) -> TuringMachine {
    TuringMachine::new(anbn_machine().validate().unwrap(), input).unwrap()
}

fn configuration(machine: &TuringMachine) -> (String, i64, usize, Status, Vec<(i64, char)>) {
    (
        machine.state().to_string(),
        machine.head(),
        machine.step_count(),
        machine.status(),
        machine.tape().cells(),
    )
}

fn input() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b')], 0..12)
        .prop_map(|symbols| symbols.into_iter().collect())
}

fn tape_cells() -> impl Strategy<Value = Vec<(i64, char)>> {
    proptest::collection::vec(
        (
            -50i64..50,
            prop_oneof![Just('a'), Just('b'), Just('_')],
        ),
        0..20,
    )
}

proptest! {
    #[test]
    fn undo_reverses_step(input in input(), steps in 0usize..40) {
        let mut machine = machine(&input);
        machine.run(steps);

        let before = configuration(&machine);
        let history = machine.history_len();

        if machine.status() == Status::Running {
            machine.step();
            prop_assert!(machine.undo(), "a running step must be undoable");
        }

        prop_assert_eq!(configuration(&machine), before);
        prop_assert_eq!(machine.history_len(), history);
    }

    #[test]
    fn run_matches_repeated_steps(input in input(), steps in 0usize..40) {
        let mut stepped = machine(&input);
        for _ in 0..steps {
            if stepped.status() != Status::Running {
                break;
            }
            stepped.step();
        }

        let mut ran = machine(&input);
        ran.run(steps);

        prop_assert_eq!(configuration(&ran), configuration(&stepped));
        prop_assert_eq!(ran.history_len(), stepped.history_len());
    }

    #[test]
    fn halting_without_rule_leaves_tape_and_head(input in input()) {
        let mut machine = machine(&input);
        machine.run(10_000);
        prop_assume!(machine.status() == Status::Rejected);

        // Step back over the halt and replay it.
        prop_assert!(machine.undo());
        let (state, head, steps, _, tape) = configuration(&machine);

        prop_assert!(!machine.step());
        prop_assert_eq!(machine.status(), Status::Rejected);
        prop_assert_eq!(machine.state(), state.as_str());
        prop_assert_eq!(machine.head(), head);
        prop_assert_eq!(machine.step_count(), steps);
        prop_assert_eq!(machine.tape().cells(), tape);
    }

    #[test]
    fn run_zero_is_noop(input in input(), steps in 0usize..20) {
        let mut machine = machine(&input);
        machine.run(steps);
        let before = configuration(&machine);

        let outcome = machine.run(0);

        prop_assert_eq!(configuration(&machine), before);
        let expected = match machine.status() {
            Status::Running => Status::Unknown,
            status => status,
        };
        prop_assert_eq!(outcome.status(), expected);
    }

    #[test]
    fn writing_blank_erases(cells in tape_cells(), position in -60i64..60) {
        let mut tape = Tape::new('_');
        for (p, symbol) in cells {
            tape.write(p, symbol);
        }
        let had_symbol = tape.read(position) != '_';
        let count = tape.len();

        tape.write(position, '_');

        prop_assert_eq!(tape.read(position), '_');
        prop_assert_eq!(tape.len(), if had_symbol { count - 1 } else { count });
        prop_assert!(tape.cells().iter().all(|&(_, symbol)| symbol != '_'));
    }

    #[test]
    fn viewport_covers_head_and_content(
        cells in tape_cells(),
        head in -100i64..100,
        padding in 0usize..6,
    ) {
        let mut tape = Tape::new('_');
        for (p, symbol) in cells {
            tape.write(p, symbol);
        }

        let viewport = view(&tape, head, padding);
        let (min, max) = tape.bounds().unwrap_or((0, 0));
        let low = min.min(head) - padding as i64;
        let high = max.max(head) + padding as i64;

        prop_assert_eq!(viewport.start, low);
        prop_assert_eq!(viewport.cells.len() as i64, high - low + 1);
        prop_assert_eq!(viewport.cells[viewport.head_offset], tape.read(head));
        for (offset, &symbol) in viewport.cells.iter().enumerate() {
            prop_assert_eq!(symbol, tape.read(low + offset as i64));
        }
    }
}
