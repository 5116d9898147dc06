//! Property tests for the tool state machine.
//!
//! Random operation sequences are replayed against a `VecDeque` model; the
//! tool must agree with the model on every return code and keep its
//! bookkeeping consistent after every step.

#[cfg(test)]
mod property_tests {
    use std::collections::VecDeque;

    use crate::{compute_crc, Crc32, RingBuffer, Tool};
    use proptest::prelude::*;
    use ringtool_types::{code_of, Mode, BUFFER_SIZE, MAX_CRC_LEN};

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Pop,
        PopNull,
        Clear,
        SetMode(u32),
        Process,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => any::<u8>().prop_map(Op::Push),
            4 => Just(Op::Pop),
            1 => Just(Op::PopNull),
            1 => Just(Op::Clear),
            1 => (0u32..4).prop_map(Op::SetMode),
            1 => Just(Op::Process),
        ]
    }

    fn assert_consistent(tool: &Tool) -> Result<(), TestCaseError> {
        let ring = tool.ring();
        prop_assert!(ring.len() <= BUFFER_SIZE);
        let distance = (ring.head() + BUFFER_SIZE - ring.tail()) % BUFFER_SIZE;
        prop_assert_eq!(distance, ring.len() % BUFFER_SIZE);

        // Free slots are always zero.
        for i in ring.len()..BUFFER_SIZE {
            prop_assert_eq!(ring.as_bytes()[(ring.tail() + i) % BUFFER_SIZE], 0);
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Count equals accepted pushes minus accepted pops, within [0, N].
        #[test]
        fn prop_count_tracks_accepted_operations(
            ops in prop::collection::vec(prop_oneof![any::<u8>().prop_map(Some), Just(None)], 0..300)
        ) {
            let mut tool = Tool::new();
            tool.init();
            let mut pushes = 0usize;
            let mut pops = 0usize;

            for op in ops {
                match op {
                    Some(b) => {
                        if tool.push(b).is_ok() {
                            pushes += 1;
                        }
                    }
                    None => {
                        if tool.pop().is_ok() {
                            pops += 1;
                        }
                    }
                }
                prop_assert_eq!(tool.len(), pushes - pops);
                prop_assert!(tool.len() <= BUFFER_SIZE);
            }
        }

        /// Initialized tool agrees with a FIFO model, Run-mode ticks included.
        #[test]
        fn prop_matches_fifo_model(ops in prop::collection::vec(op(), 0..300)) {
            let mut tool = Tool::new();
            tool.init();
            let mut model: VecDeque<u8> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Push(b) => {
                        let code = code_of(&tool.push(b));
                        if model.len() < BUFFER_SIZE {
                            prop_assert_eq!(code, 0);
                            model.push_back(b);
                        } else {
                            prop_assert_eq!(code, 1);
                            prop_assert!(tool.flags().overflow);
                        }
                    }
                    Op::Pop => {
                        let mut out = 0xAA;
                        let code = code_of(&tool.pop_into(Some(&mut out)));
                        match model.pop_front() {
                            Some(expected) => {
                                prop_assert_eq!(code, 0);
                                prop_assert_eq!(out, expected);
                            }
                            None => {
                                prop_assert_eq!(code, 1);
                                prop_assert_eq!(out, 0);
                            }
                        }
                    }
                    Op::PopNull => {
                        let before = tool.ring().clone();
                        prop_assert_eq!(code_of(&tool.pop_into(None)), 3);
                        prop_assert_eq!(tool.ring(), &before);
                    }
                    Op::Clear => {
                        tool.clear();
                        model.clear();
                        prop_assert!(!tool.flags().err);
                        prop_assert!(!tool.flags().overflow);
                        prop_assert!(tool.flags().init);
                    }
                    Op::SetMode(raw) => {
                        let code = code_of(&tool.set_mode_raw(raw));
                        prop_assert_eq!(code, if raw < 3 { 0 } else { 2 });
                    }
                    Op::Process => {
                        let run = tool.mode() == Mode::Run;
                        let before = tool.ring().clone();
                        tool.process();
                        if run && !model.is_empty() {
                            // Replay the recirculation on the model.
                            let key = (tool.cycle() & 0xFF) as u8;
                            for _ in 0..BUFFER_SIZE {
                                if let Some(b) = model.pop_front() {
                                    model.push_back(b ^ key);
                                }
                            }
                            prop_assert_eq!(tool.ring().head(), before.head());
                            prop_assert_eq!(tool.ring().tail(), before.tail());
                        } else {
                            prop_assert_eq!(tool.ring(), &before);
                        }
                    }
                }
                prop_assert_eq!(tool.ring().iter().collect::<Vec<_>>(), Vec::from(model.clone()));
                assert_consistent(&tool)?;
            }
        }

        /// Uninitialized tools reject every guarded operation and stay empty.
        #[test]
        fn prop_uninitialized_rejects(ops in prop::collection::vec(op(), 0..50)) {
            let mut tool = Tool::new();
            for op in ops {
                match op {
                    Op::Push(b) => {
                        prop_assert_eq!(code_of(&tool.push(b)), 2);
                    }
                    Op::Pop => {
                        prop_assert_eq!(code_of(&tool.pop()), 2);
                    }
                    Op::PopNull => {
                        prop_assert_eq!(code_of(&tool.pop_into(None)), 3);
                    }
                    Op::SetMode(raw) => {
                        prop_assert_eq!(code_of(&tool.set_mode_raw(raw)), 1);
                    }
                    Op::Clear => tool.clear(),
                    Op::Process => tool.process(),
                }
                prop_assert_eq!(tool.ring(), &RingBuffer::new());
                prop_assert_eq!(tool.mode(), Mode::Idle);
            }
        }

        /// The one-shot CRC equals the incremental hasher over the capped prefix.
        #[test]
        fn prop_crc_matches_incremental(
            data in prop::collection::vec(any::<u8>(), 1..400),
            split in 0usize..400,
        ) {
            let len = data.len().min(MAX_CRC_LEN);
            let split = split.min(len);
            let mut crc = Crc32::new();
            crc.update(&data[..split]);
            crc.update(&data[split..len]);

            prop_assert_eq!(compute_crc(Some(&data), data.len()), crc.finalize());
        }
    }
}
