//! Resource cache - CPU-side mesh and material handles
//!
//! The simulation core never loads or uploads assets. It asks a
//! [`ResourceProvider`] for opaque, reference-counted handles by name and
//! passes them through to the renderer. Several entities may share one handle;
//! the core only clones the `Arc`, never assumes unique ownership.
//!
//! A missing name is not an error: it is logged at `warn` and the caller
//! renders nothing (meshes) or uses the provider's fallback (materials).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the material every provider hands out when a lookup fails
pub const FALLBACK_MATERIAL_NAME: &str = "fallback";

/// CPU-side description of a loaded mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshAsset {
    /// Lookup name
    pub name: String,
    /// Vertex count, informational only
    pub vertex_count: usize,
}

/// CPU-side description of a material
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAsset {
    /// Lookup name
    pub name: String,
    /// Linear RGBA base color
    pub base_color: [f32; 4],
}

/// Shared handle to a mesh owned by a resource cache
#[derive(Clone)]
pub struct MeshHandle(Arc<MeshAsset>);

/// Shared handle to a material owned by a resource cache
#[derive(Clone)]
pub struct MaterialHandle(Arc<MaterialAsset>);

macro_rules! impl_handle {
    ($handle:ident, $asset:ident) => {
        impl $handle {
            /// Wrap a freshly created asset
            pub fn new(asset: $asset) -> Self {
                Self(Arc::new(asset))
            }

            /// Lookup name of the underlying asset
            pub fn name(&self) -> &str {
                &self.0.name
            }

            /// Borrow the underlying asset
            pub fn asset(&self) -> &$asset {
                &self.0
            }

            /// Whether both handles refer to the same asset instance
            pub fn same_asset(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }

            /// Number of live handles to this asset, the cache's included
            pub fn share_count(&self) -> usize {
                Arc::strong_count(&self.0)
            }
        }

        impl PartialEq for $handle {
            fn eq(&self, other: &Self) -> bool {
                self.same_asset(other)
            }
        }

        impl fmt::Debug for $handle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($handle), self.name())
            }
        }
    };
}

impl_handle!(MeshHandle, MeshAsset);
impl_handle!(MaterialHandle, MaterialAsset);

/// Source of mesh and material handles
///
/// Implemented by whatever owns the real assets. Lookups must be cheap: the
/// lifecycle system calls them when swapping a downed duck's visuals.
pub trait ResourceProvider: Send + Sync {
    /// Mesh registered under `name`
    fn mesh(&self, name: &str) -> Option<MeshHandle>;

    /// Material registered under `name`
    fn material(&self, name: &str) -> Option<MaterialHandle>;

    /// Material used when an entity has none or a lookup fails
    fn fallback_material(&self) -> MaterialHandle;

    /// Material for `name`, or the fallback when it is unknown
    fn material_or_fallback(&self, name: &str) -> MaterialHandle {
        self.material(name).unwrap_or_else(|| {
            log::warn!("Material '{name}' not found, using '{FALLBACK_MATERIAL_NAME}'");
            self.fallback_material()
        })
    }
}

/// In-memory [`ResourceProvider`] keyed by name
pub struct ResourceCache {
    meshes: HashMap<String, MeshHandle>,
    materials: HashMap<String, MaterialHandle>,
    fallback: MaterialHandle,
}

impl ResourceCache {
    /// Create a cache holding only the magenta fallback material
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            materials: HashMap::new(),
            fallback: MaterialHandle::new(MaterialAsset {
                name: FALLBACK_MATERIAL_NAME.to_string(),
                base_color: [1.0, 0.0, 1.0, 1.0],
            }),
        }
    }

    /// Register a mesh, replacing any previous entry of that name
    pub fn insert_mesh(&mut self, name: &str, vertex_count: usize) -> MeshHandle {
        let handle = MeshHandle::new(MeshAsset {
            name: name.to_string(),
            vertex_count,
        });
        self.meshes.insert(name.to_string(), handle.clone());
        log::debug!("Registered mesh '{name}' ({vertex_count} vertices)");
        handle
    }

    /// Register a material, replacing any previous entry of that name
    pub fn insert_material(&mut self, name: &str, base_color: [f32; 4]) -> MaterialHandle {
        let handle = MaterialHandle::new(MaterialAsset {
            name: name.to_string(),
            base_color,
        });
        self.materials.insert(name.to_string(), handle.clone());
        log::debug!("Registered material '{name}'");
        handle
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of registered materials, fallback excluded
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for ResourceCache {
    fn mesh(&self, name: &str) -> Option<MeshHandle> {
        let mesh = self.meshes.get(name).cloned();
        if mesh.is_none() {
            log::warn!("Mesh '{name}' not found");
        }
        mesh
    }

    fn material(&self, name: &str) -> Option<MaterialHandle> {
        self.materials.get(name).cloned()
    }

    fn fallback_material(&self) -> MaterialHandle {
        self.fallback.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_shared() {
        let mut cache = ResourceCache::new();
        let duck = cache.insert_mesh("duck", 1200);

        let a = cache.mesh("duck").unwrap();
        let b = cache.mesh("duck").unwrap();
        assert!(a.same_asset(&b));
        assert_eq!(a, duck);
        // cache + duck + a + b
        assert_eq!(duck.share_count(), 4);
    }

    #[test]
    fn test_missing_mesh_is_none() {
        let cache = ResourceCache::new();
        assert!(cache.mesh("nope").is_none());
    }

    #[test]
    fn test_missing_material_falls_back() {
        let mut cache = ResourceCache::new();
        cache.insert_material("feathers", [0.2, 0.6, 0.1, 1.0]);

        assert_eq!(cache.material_or_fallback("feathers").name(), "feathers");
        let fallback = cache.material_or_fallback("missing");
        assert_eq!(fallback.name(), FALLBACK_MATERIAL_NAME);
        assert!(fallback.same_asset(&cache.fallback_material()));
    }

    #[test]
    fn test_reinsert_replaces_entry() {
        let mut cache = ResourceCache::new();
        let first = cache.insert_mesh("duck", 10);
        let second = cache.insert_mesh("duck", 20);
        assert!(!first.same_asset(&second));
        assert_eq!(cache.mesh("duck").unwrap().asset().vertex_count, 20);
        assert_eq!(cache.mesh_count(), 1);
    }
}
