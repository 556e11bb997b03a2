//! 3x3 LED matrix running looping animations, advanced by a button.
//!
//! Wiring: three anode (column) pins left to right, three cathode (row) pins
//! top to bottom, each cathode through a resistor. The button connects 3V3 to
//! its pin; the internal pull-down keeps the line low until pressed.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, future, panic};

use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use matrix_envoy::{
    Error, Result,
    catalog::Catalog,
    config::ScanConfig,
    frame::Frame,
    pins::GpioPinController,
    sequencer::{CancelToken, Sequencer},
    watcher::{ADVANCE_DEBOUNCE, PressLatch, watch_advance_button},
};
use {defmt_rtt as _, panic_probe as _};

type Frame3x3 = Frame<3, 3>;

/// Debounced presses from the advance button.
static PRESSES: PressLatch = PressLatch::new();

/// Never signaled; the demo runs until power-off.
static CANCEL: CancelToken = CancelToken::new();

/// The demo catalog: five short animations for the 3x3 grid, written as the
/// 0/1 rows you would sketch on paper (top row first).
static ANIMATIONS: [&[Frame3x3]; 5] = [
    // Sweep: bar and diagonal chase
    &[
        Frame3x3::from_bits([[1, 1, 1], [0, 0, 0], [0, 0, 0]]),
        Frame3x3::from_bits([[1, 0, 0], [0, 1, 0], [0, 0, 1]]),
        Frame3x3::from_bits([[1, 0, 0], [1, 0, 0], [1, 0, 0]]),
        Frame3x3::from_bits([[0, 0, 1], [0, 1, 0], [1, 0, 0]]),
        Frame3x3::from_bits([[0, 0, 0], [0, 0, 0], [1, 1, 1]]),
        Frame3x3::from_bits([[1, 0, 0], [0, 1, 0], [0, 0, 1]]),
        Frame3x3::from_bits([[0, 0, 1], [0, 0, 1], [0, 0, 1]]),
        Frame3x3::from_bits([[0, 0, 1], [0, 1, 0], [1, 0, 0]]),
    ],
    // Snake: grow from a corner
    &[
        Frame3x3::from_bits([[0, 0, 0], [0, 0, 0], [0, 0, 1]]),
        Frame3x3::from_bits([[0, 0, 0], [0, 1, 1], [0, 1, 0]]),
        Frame3x3::from_bits([[1, 1, 1], [1, 0, 0], [1, 0, 0]]),
    ],
    // Rows: bounce top to bottom
    &[
        Frame3x3::from_bits([[1, 1, 1], [0, 0, 0], [0, 0, 0]]),
        Frame3x3::from_bits([[0, 0, 0], [1, 1, 1], [0, 0, 0]]),
        Frame3x3::from_bits([[0, 0, 0], [0, 0, 0], [1, 1, 1]]),
        Frame3x3::from_bits([[0, 0, 0], [1, 1, 1], [0, 0, 0]]),
    ],
    // Spinner: corner shapes alternating with a plus
    &[
        Frame3x3::from_bits([[1, 1, 1], [0, 0, 1], [0, 0, 1]]),
        Frame3x3::from_bits([[0, 1, 0], [1, 1, 1], [0, 1, 0]]),
        Frame3x3::from_bits([[1, 0, 0], [1, 0, 0], [1, 1, 1]]),
        Frame3x3::from_bits([[0, 1, 0], [1, 1, 1], [0, 1, 0]]),
    ],
    // Sparkle: opposite corners and edges
    &[
        Frame3x3::from_bits([[0, 0, 1], [0, 0, 0], [1, 0, 0]]),
        Frame3x3::from_bits([[0, 1, 0], [0, 0, 0], [0, 1, 0]]),
        Frame3x3::from_bits([[1, 0, 0], [0, 0, 0], [0, 0, 1]]),
        Frame3x3::from_bits([[0, 0, 0], [1, 0, 1], [0, 0, 0]]),
    ],
];

#[embassy_executor::task]
async fn advance_button_task(button: Input<'static>) -> ! {
    watch_advance_button(button, &PRESSES, ADVANCE_DEBOUNCE).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Anode columns left to right, cathode rows top to bottom.
    let anodes = [
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_18, Level::Low),
    ];
    let cathodes = [
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    ];

    // The watch task owns the input pin and latches debounced presses.
    let button = Input::new(p.PIN_22, Pull::Down);
    spawner
        .spawn(advance_button_task(button))
        .map_err(Error::TaskSpawn)?;

    let mut pins = GpioPinController::new(anodes, cathodes, &PRESSES)?;
    let catalog = Catalog::new(&ANIMATIONS)?;

    let mut sequencer = Sequencer::new(&ScanConfig::default());
    sequencer.run(&mut pins, &catalog, &CANCEL).await?;

    // Only cancellation ends the run loop, and the demo never cancels.
    future::pending().await
}
