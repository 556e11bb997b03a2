//! Shared helpers for replaying recorded pin operations.
#![allow(dead_code)] // each test binary uses a different subset

use matrix_envoy::frame::Frame;
use matrix_envoy::host_pins::PinOp;
use matrix_envoy::pins::CathodeWiring;

/// One anode's active window: which anode was high and the final level each
/// cathode was driven to while it was.
#[derive(Debug, PartialEq, Eq)]
pub struct AnodeStep {
    pub anode: usize,
    pub cathode_levels: Vec<Option<bool>>,
}

/// Replay an op log into anode steps.
///
/// Panics if a second anode is raised while one is active - the core scanner
/// invariant - so every test that replays a log also checks it.
pub fn anode_steps(ops: &[PinOp], cathode_count: usize) -> Vec<AnodeStep> {
    let mut steps = Vec::new();
    let mut active: Option<AnodeStep> = None;
    for op in ops {
        match *op {
            PinOp::Anode { index, high: true } => {
                assert!(
                    active.is_none(),
                    "anode {index} raised while another anode is active"
                );
                active = Some(AnodeStep {
                    anode: index,
                    cathode_levels: vec![None; cathode_count],
                });
            }
            PinOp::Anode { index, high: false } => {
                if let Some(step) = active.take() {
                    assert_eq!(step.anode, index, "lowered a different anode than the active one");
                    steps.push(step);
                }
                // Lowering an already-inactive anode (baseline, teardown) is fine.
            }
            PinOp::Cathode { index, high } => {
                if let Some(step) = active.as_mut() {
                    step.cathode_levels[index] = Some(high);
                }
            }
            PinOp::Release => {}
        }
    }
    assert!(active.is_none(), "an anode was left active at the end of the log");
    steps
}

/// Decode the sequence of distinct frames a log rendered.
///
/// Groups anode steps into full scan cycles, rebuilds the grid each cycle
/// showed, and collapses consecutive repeats (one frame is scanned many
/// cycles during its hold).
pub fn rendered_frames<const W: usize, const H: usize>(
    ops: &[PinOp],
    wiring: CathodeWiring,
) -> Vec<Frame<W, H>> {
    let steps = anode_steps(ops, H);
    let lit = wiring.lit_level();
    let mut frames: Vec<Frame<W, H>> = Vec::new();
    for cycle in steps.chunks_exact(W) {
        let mut frame = Frame::<W, H>::new();
        for (position, step) in cycle.iter().enumerate() {
            assert_eq!(step.anode, position, "anodes visited left to right");
            for row in 0..H {
                let level = step.cathode_levels[row]
                    .expect("every cathode is written while the anode is active");
                frame[(step.anode, row)] = level == lit;
            }
        }
        frames.push(frame);
    }
    frames.dedup();
    frames
}

/// A frame with a single lit pixel, handy as a recognizable marker.
pub fn single_pixel<const W: usize, const H: usize>(col: usize, row: usize) -> Frame<W, H> {
    let mut frame = Frame::new();
    frame[(col, row)] = true;
    frame
}
