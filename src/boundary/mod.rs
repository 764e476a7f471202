//! Boundary face kernels for scalar transport.
//!
//! A boundary face has only the owning element. The value outside the
//! domain is prescribed by an [`InputSource`], and whether it is imposed
//! depends on the direction of the advective flux.
//!
//! # Available Kernels
//!
//! | Kernel | Mode | Description |
//! |--------|------|-------------|
//! | `BoundaryFluxLimiter` | `Advective` | Upwind outflow, prescribed inflow value |
//! | `BoundaryFluxLimiter` | `Diffusive` | Penalized (Nitsche) Dirichlet for diffusion |
//! | `BoundaryFluxLimiter` | `FluxLimited` | Upwind outflow, penalized inflow |
//! | `WallHeatFlux` | | Newton cooling `h_w·(u − T_w)` |
//!
//! # Composition
//!
//! Velocity, diffusion tensor and inlet value are independent strategies:
//!
//! ```text
//! BoundaryFluxLimiter
//!   ├── VelocitySource   ConstantVelocity | FieldVelocity
//!   ├── DiffusionSource  ConstantDiffusion | AxisFieldDiffusion | ScalarFieldDiffusion
//!   ├── InputSource      ConstantInput | FieldInput | ScheduledInput | PpmInput
//!   └── porosity         Coefficient
//! ```
//!
//! # Time-Varying Inlets
//!
//! [`ScheduledInput`] evaluates a step/ramp schedule at the integration
//! point's time. Its cursor is shared by every face the kernel is applied to
//! and only moves forward, so one kernel instance must follow one timeline:
//! ```ignore
//! let schedule = ScheduleConfig::steps(vec![0.0, 3600.0], vec![400.0, 800.0])
//!     .with_time_spans(vec![0.0, 600.0]);
//! let inlet = PpmInput::new(ScheduledInput::new(&schedule, 0.0)?, "P".into(), "T".into());
//! let bc = BoundaryFluxLimiter::flux_limited("CO2", penalty, velocity, diffusion, inlet);
//! ```

mod flux_limited;
pub mod input;
pub mod traits;
mod wall_heat_flux;

pub use flux_limited::{BoundaryFlux, BoundaryFluxLimiter, BoundarySample, FluxDirection};
pub use input::{
    ConstantInput, FieldInput, InputSample, InputSchedule, InputSource, PpmInput, ScheduleConfig,
    ScheduledInput,
};
pub use traits::BoundaryFaceKernel;
pub use wall_heat_flux::{WallHeatFlux, WallSample};
