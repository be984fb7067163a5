//! Binding state of material sites as reported to the MES agents.

use chrono::{DateTime, Utc};

use crate::mcom::{
    BoundResource, MaterialSite, MaterialStatus, RecipeProcessStep, SiteContent, SiteSubType,
    SiteType,
};
use crate::mes::{SiteBindingState, SiteResource};

/// A bound material is not OK when the recipe does not use it, or when it is
/// unavailable or expired.
pub fn material_not_ok(material: &MaterialSite, steps: &[RecipeProcessStep], now: DateTime<Utc>) -> bool {
    let in_recipe = steps
        .iter()
        .flat_map(|step| step.materials.iter())
        .any(|m| m.name == material.material.id);
    if !in_recipe {
        return true;
    }
    material.status != MaterialStatus::Available || material.expiry_time < now
}

/// Resources of a material site in content order. `not_ok` is set once any
/// resource fails [`material_not_ok`]. Other sub types report nothing.
pub fn material_binding_state(
    site_type: SiteType,
    sub_type: SiteSubType,
    content: &SiteContent,
    steps: &[RecipeProcessStep],
) -> SiteBindingState {
    let mut state = SiteBindingState::default();
    if sub_type != SiteSubType::Material {
        return state;
    }

    let now = Utc::now();
    let bound: Vec<&BoundResource> = match site_type {
        SiteType::Slot => content.slot.iter().collect(),
        SiteType::Container => content.container.iter().flatten().collect(),
        SiteType::Collection => content.collection.iter().flatten().collect(),
        SiteType::Queue => content.queue.iter().flatten().collect(),
        SiteType::Colqueue => content.colqueue.iter().flatten().flatten().collect(),
        SiteType::Unspecified => Vec::new(),
    };
    for material in bound.into_iter().filter_map(|b| b.material.as_ref()) {
        state.resources.push(SiteResource::new(&material.resource_id));
        if !state.not_ok {
            state.not_ok = material_not_ok(material, steps, now);
        }
    }
    state
}
