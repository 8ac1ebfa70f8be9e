//! Layout planning: from detected displays and a request to the exact
//! xrandr arguments and the result that applying them would produce.
//!
//! Only connected displays take part. The internal display configured is
//! the first connected one classified Internal, and an external-only layout
//! switches off every connected internal one. Externals keep detection
//! order and the first of them is the one configured.

use crate::error::DmonError;
use crate::infrastructure::xrandr::{build_args, Arrangement, Classifier, OutputSetting};
use crate::layout::select::select_resolution;
use crate::types::display::{Category, Display};
use crate::types::request::{ConfigRequest, ConfigResult, ConfiguredDisplay, Target};


/// Connected displays split by category, each in detection order.
#[derive(Debug, Clone)]
pub struct Inventory<'a> {
    pub internals: Vec<&'a Display>,
    pub externals: Vec<&'a Display>,
}

impl<'a> Inventory<'a> {
    pub fn internal(&self) -> Option<&'a Display> {
        self.internals.first().copied()
    }

    pub fn external(&self) -> Option<&'a Display> {
        self.externals.first().copied()
    }
}

pub fn categorize(displays: &[Display]) -> Inventory<'_> {
    let (internals, externals): (Vec<&Display>, Vec<&Display>) = displays
        .iter()
        .filter(|d| d.connected)
        .partition(|d| d.category == Category::Internal);
    Inventory {
        internals,
        externals,
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub arrangement: Arrangement,
    pub args: Vec<String>,
    pub result: ConfigResult,
}


/// Resolve `request` against `displays`. Fails before any mode lookup when
/// a required display is missing.
pub fn plan(
    displays: &[Display],
    request: &ConfigRequest,
    classifier: &Classifier,
) -> Result<Plan, DmonError> {
    let inventory = categorize(displays);
    let need_internal = || {
        inventory.internal().ok_or_else(|| DmonError::NoInternalDisplay {
            prefixes: classifier.prefixes().to_vec(),
        })
    };
    let need_external = || inventory.external().ok_or(DmonError::NoExternalDisplay);

    let (arrangement, configured) = match request.target {
        Target::Internal => {
            let internal = need_internal()?;
            let res = select_resolution(internal, &request.mode)?;
            (
                Arrangement::InternalOnly {
                    internal: OutputSetting::new(&internal.id, &res),
                },
                vec![applied(internal, &res)],
            )
        }
        Target::External => {
            let external = need_external()?;
            let res = select_resolution(external, &request.mode)?;
            let mut configured = vec![applied(external, &res)];
            configured.extend(inventory.internals.iter().map(|d| switched_off(d)));
            (
                Arrangement::ExternalOnly {
                    external: OutputSetting::new(&external.id, &res),
                    internals: inventory.internals.iter().map(|d| d.id.clone()).collect(),
                },
                configured,
            )
        }
        Target::Both => {
            let internal = need_internal()?;
            let external = need_external()?;
            let external_res = select_resolution(external, &request.mode)?;
            let internal_res = select_resolution(internal, &request.mode)?;
            (
                Arrangement::Both {
                    external: OutputSetting::new(&external.id, &external_res),
                    internal: OutputSetting::new(&internal.id, &internal_res),
                    position: request.position,
                },
                vec![applied(external, &external_res), applied(internal, &internal_res)],
            )
        }
    };

    Ok(Plan {
        args: build_args(&arrangement),
        arrangement,
        result: ConfigResult {
            displays: configured,
            request: *request,
        },
    })
}


fn applied(display: &Display, resolution: &str) -> ConfiguredDisplay {
    ConfiguredDisplay {
        id: display.id.clone(),
        category: display.category,
        resolution: resolution.to_string(),
        active: true,
    }
}

fn switched_off(display: &Display) -> ConfiguredDisplay {
    ConfiguredDisplay {
        id: display.id.clone(),
        category: display.category,
        resolution: String::new(),
        active: false,
    }
}
