//! Builtin CNN text-classification sweep

use crate::overlay::SemiRandomOverlay;
use crate::render::CommandTemplate;
use crate::space::{ParameterEntry, Registry};

use super::SweepFile;

/// Sweep used when no sweep file is given
///
/// Depth is pinned to two convolution layers; dropout rates and per-layer L2
/// regularisation are sized by it, and kernel shapes come from the overlay.
pub fn builtin_sweep() -> SweepFile {
    let params = Registry::new()
        .with(ParameterEntry::new("conv_layer_n", [2i64, 3]).disabled(2i64))
        .with(
            ParameterEntry::new("fold", [0i64, 1])
                .disabled(1i64)
                .depends_on("conv_layer_n")
                .repeated(),
        )
        .with(ParameterEntry::new("dr", [0.5]).depends_on("conv_layer_n"))
        .with(ParameterEntry::new("ext_ebd", [true, false]).disabled(false))
        .with(ParameterEntry::new("batch_size", [9i64, 10, 11, 12]).disabled(10i64))
        .with(ParameterEntry::new("ebd_dm", [48i64]))
        .with(ParameterEntry::new("l2_regs", [1e-4, 1e-5, 1e-6]).depends_on("conv_layer_n+2"));

    let overlay = SemiRandomOverlay::new()
        .with("ks", 2i64, [20i64, 5])
        .with("ks", 3i64, [20i64, 10, 5])
        .with("nkerns", 2i64, [6i64, 12])
        .with("nkerns", 3i64, [5i64, 10, 18])
        .with("filter_widths", 2i64, [10i64, 7])
        .with("filter_widths", 3i64, [6i64, 5, 3])
        .with("l2_regs", 2i64, [1e-6, 3e-5, 3e-5, 1e-4])
        .with("l2_regs", 3i64, [1e-6, 3e-5, 3e-6, 1e-5, 1e-4]);

    SweepFile {
        command: CommandTemplate::default(),
        controller: Some("conv_layer_n".to_string()),
        params,
        overlay: overlay.tables().to_vec(),
    }
}
