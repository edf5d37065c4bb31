//! # Stratified Tank Simulation
//!
//! Simulates an electric water heater through a few days of household draws,
//! with a deadband thermostat switching a single element.
//!
//! To run this example:
//!
//! ```sh
//! cargo run --example stratified_tank --release
//! ```

use std::{error::Error, ops::Range};

use jiff::{
    SignedDuration,
    civil::{self, DateTime},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use twine_core::Model;
use twine_tank::{
    models::thermal::tank::{
        InitialProfile, Location, PortFlow, PortLocation, StepInput, StratifiedTank, Surfaces,
        TankConfig,
    },
    support::constraint::{NonNegative, StrictlyPositive},
};
use uom::{
    ConstZero,
    si::{
        energy::kilowatt_hour,
        f64::{Energy, MassRate, Power, ThermodynamicTemperature, Time},
        mass_rate::kilogram_per_second,
        power::kilowatt,
        ratio::percent,
        thermodynamic_temperature::degree_celsius,
        time::minute,
    },
};

/// Number of nodes in the tank.
const NODES: usize = 20;

/// Height fraction of the element.
const ELEMENT_HEIGHT: f64 = 0.3;

/// Height fraction of the element's thermostat.
const THERMOSTAT_HEIGHT: f64 = 0.4;

/// Rated power of the electric heating element, in kW.
const ELEMENT_KW: f64 = 4.5;

/// Thermostat temperature setpoint, in °C.
const SETPOINT_C: f64 = 55.0;

/// Thermostat deadband width, in °C.
const DEADBAND_C: f64 = 8.0;

/// Mains water temperature, in °C.
const MAINS_C: f64 = 12.0;

/// Days to simulate.
const DAYS: usize = 3;

/// Daily draws as time windows and mass flow rates in kg/s.
fn draw_schedule() -> [(Range<civil::Time>, f64); 3] {
    [
        (civil::Time::constant(7, 0, 0, 0)..civil::Time::constant(7, 10, 0, 0), 0.15),
        (civil::Time::constant(12, 30, 0, 0)..civil::Time::constant(12, 35, 0, 0), 0.08),
        (civil::Time::constant(19, 0, 0, 0)..civil::Time::constant(19, 20, 0, 0), 0.12),
    ]
}

fn draw_at(time: civil::Time) -> MassRate {
    draw_schedule()
        .into_iter()
        .find(|(window, _)| window.contains(&time))
        .map_or(MassRate::ZERO, |(_, rate)| {
            MassRate::new::<kilogram_per_second>(rate)
        })
}

/// Switches the element on below the deadband and off above it.
fn thermostat(element_on: bool, temperature: ThermodynamicTemperature) -> bool {
    let celsius = temperature.get::<degree_celsius>();
    if celsius < SETPOINT_C - DEADBAND_C / 2.0 {
        true
    } else if celsius > SETPOINT_C + DEADBAND_C / 2.0 {
        false
    } else {
        element_on
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let celsius = ThermodynamicTemperature::new::<degree_celsius>;

    // A 189 liter tank with draws entering at the bottom and leaving at the top.
    let tank = StratifiedTank::<NODES, 1, 1, 1>::new(
        &TankConfig::default(),
        [PortLocation {
            inlet: Location::tank_bottom(),
            outlet: Location::tank_top(),
        }],
        [Location::HeightFraction(ELEMENT_HEIGHT)],
        [Location::HeightFraction(THERMOSTAT_HEIGHT)],
    )?;

    let timestep = StrictlyPositive::new(Time::new::<minute>(1.0))?;
    let environment = Surfaces::uniform(celsius(20.0));

    let mut temperatures =
        InitialProfile::LinearStratified.temperatures::<NODES>(celsius(MAINS_C), celsius(50.0));
    let mut datetime = DateTime::default();
    let mut element_on = false;

    let mut heater_energy = Energy::ZERO;
    let mut delivered_energy = Energy::ZERO;
    let mut non_converged = 0;

    for step in 0..DAYS * 24 * 60 {
        let power = if element_on {
            Power::new::<kilowatt>(ELEMENT_KW)
        } else {
            Power::ZERO
        };

        let output = tank.call(&StepInput {
            temperatures,
            port_flows: [PortFlow::new(draw_at(datetime.time()), celsius(MAINS_C))?],
            heater_powers: [NonNegative::new(power)?],
            environment,
            timestep,
        })?;

        heater_energy += output.energy.heater_input;
        delivered_energy += output.energy.total_delivered();
        if output.iteration_limit_reached {
            non_converged += 1;
        }

        element_on = thermostat(element_on, output.thermostats[0]);
        temperatures = output.temperatures;
        datetime = datetime.checked_add(SignedDuration::from_mins(1))?;

        if (step + 1) % (24 * 60) == 0 {
            info!(
                day = (step + 1) / (24 * 60),
                top_c = temperatures[0].get::<degree_celsius>(),
                bottom_c = temperatures[NODES - 1].get::<degree_celsius>(),
                soc_pct = output.state_of_charge.into_inner().get::<percent>(),
                heater_kwh = heater_energy.get::<kilowatt_hour>(),
                delivered_kwh = delivered_energy.get::<kilowatt_hour>(),
                "end of day"
            );
        }
    }

    info!(non_converged, "simulation complete");
    Ok(())
}
