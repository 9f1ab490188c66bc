#![no_std]
#![no_main]

mod cycle;
mod errors;
mod gain;
mod report;
mod serial;
mod tsl2591;

use panic_halt as _;

// Saturation threshold, full spectrum counts above this lower the gain
const GAIN_THRESHOLD_HIGH: u16 = 34000;
// Sensitivity threshold, full spectrum counts below this raise the gain
const GAIN_THRESHOLD_LOW: u16 = 1300;
// Gain applied at power-up
const INITIAL_GAIN: gain::GainLevel = gain::GainLevel::Medium;
// TSL2591 ADC integration time
const INTEGRATION_TIME: tsl2591::IntegrationTime = tsl2591::IntegrationTime::Ms100;
// Pause between two measurements
const MEASURE_INTERVAL_MS: u64 = 100;
// Number of errors kept for reporting
const ERROR_QUEUE_SIZE: usize = 8;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [EXTI1, EXTI2])]
mod app {
    use heapless::spsc::Queue;
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{
        gpio::{gpiob, Alternate, OpenDrain},
        i2c::I2c,
        pac,
        prelude::*,
        serial::{config::Config, Tx},
    };
    use systick_monotonic::{ExtU64, Systick};

    use crate::{
        cycle,
        errors::Error,
        gain::GainController,
        serial::{SerialWriter, BAUD_RATE},
        tsl2591::Tsl2591,
        ERROR_QUEUE_SIZE, GAIN_THRESHOLD_HIGH, GAIN_THRESHOLD_LOW, INITIAL_GAIN, INTEGRATION_TIME,
        MEASURE_INTERVAL_MS,
    };

    type LightSensor = Tsl2591<
        I2c<
            pac::I2C1,
            (
                gpiob::PB6<Alternate<4, OpenDrain>>,
                gpiob::PB7<Alternate<4, OpenDrain>>,
            ),
        >,
    >;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>;

    #[shared]
    struct Shared {
        errors: Queue<Error, ERROR_QUEUE_SIZE>,
    }

    #[local]
    struct Local {
        lightsensor: LightSensor,
        controller: GainController,
        tx: Tx<pac::USART2>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        rtt_init_print!();

        rprintln!("Initializing");

        // Clock setup
        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(48.MHz()).freeze();
        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().raw());

        rprintln!("Clock setup done");

        // GPIO setup
        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // I2C setup. SCL is PB6 and SDA is PB7 (both with AF04).
        let scl = gpiob.pb6.into_alternate_open_drain::<4>();
        let sda = gpiob.pb7.into_alternate_open_drain::<4>();
        let i2c = I2c::new(ctx.device.I2C1, (scl, sda), 400.kHz(), &clocks);

        // Serial setup. TX is PA2 (AF07).
        let tx = ctx
            .device
            .USART2
            .tx(
                gpioa.pa2.into_alternate::<7>(),
                Config::default().baudrate(BAUD_RATE.bps()),
                &clocks,
            )
            .unwrap();

        rprintln!("I2C and serial setup done");

        // Light sensor
        let mut errors = Queue::new();
        let mut lightsensor = Tsl2591::new(i2c);
        if let Err(e) = lightsensor.init(INITIAL_GAIN, INTEGRATION_TIME) {
            rprintln!("Could not initialize TSL2591: {:?}", e);
            Error::SensorInitFailed.log(&mut errors);
        }
        rprintln!("Light sensor setup done");

        let controller = GainController::new(GAIN_THRESHOLD_HIGH, GAIN_THRESHOLD_LOW);

        measure::spawn().unwrap();
        report_errors::spawn().unwrap();

        rprintln!("Done initializing");

        (
            Shared { errors },
            Local {
                lightsensor,
                controller,
                tx,
            },
            init::Monotonics(mono),
        )
    }

    /// Read the sensor, adjust its gain and emit one line. Reschedules itself
    /// once the pass is done.
    #[task(priority = 2, local = [lightsensor, controller, tx], shared = [errors])]
    fn measure(mut ctx: measure::Context) {
        let elapsed_ms = monotonics::now().duration_since_epoch().to_millis();
        let result = cycle::run(
            ctx.local.lightsensor,
            ctx.local.controller,
            &mut SerialWriter(ctx.local.tx),
            elapsed_ms,
        );

        if let Err(error) = result {
            ctx.shared.errors.lock(|errors| error.log(errors));
            report_errors::spawn().ok();
        }

        measure::spawn_after(MEASURE_INTERVAL_MS.millis()).ok();
    }

    /// Print all queued errors over RTT.
    #[task(priority = 1, shared = [errors])]
    fn report_errors(mut ctx: report_errors::Context) {
        while let Some(error) = ctx.shared.errors.lock(|errors| errors.dequeue()) {
            rprintln!("Error: {}", error.message());
        }
    }
}
