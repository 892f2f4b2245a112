//! Asset handles consumed by the simulation core

pub mod resource_cache;

pub use resource_cache::{
    MaterialAsset, MaterialHandle, MeshAsset, MeshHandle, ResourceCache, ResourceProvider,
    FALLBACK_MATERIAL_NAME,
};
