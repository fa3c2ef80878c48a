//! One-shot snapshot of every object BlueZ exports.

use std::collections::HashMap;

use zbus::zvariant::OwnedObjectPath;

use crate::{props::PropertyBag, Error, Result, Session};

/// The interfaces exported by a single object, keyed by interface name.
pub type Interfaces = HashMap<String, PropertyBag>;

/// The full object graph returned by `GetManagedObjects`.
///
/// The graph is unordered; consumers must not rely on iteration order.
#[derive(Debug, Default, Clone)]
pub struct ManagedObjectGraph {
    objects: HashMap<OwnedObjectPath, Interfaces>,
}

impl ManagedObjectGraph {
    /// Returns the number of objects in the graph.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Yields every object exporting `interface`, along with that interface's properties.
    pub fn objects_with<'a>(
        &'a self,
        interface: &'a str,
    ) -> impl Iterator<Item = (&'a OwnedObjectPath, &'a PropertyBag)> + 'a {
        self.objects
            .iter()
            .filter_map(move |(path, intfs)| intfs.get(interface).map(|props| (path, props)))
    }
}

impl FromIterator<(OwnedObjectPath, Interfaces)> for ManagedObjectGraph {
    fn from_iter<I: IntoIterator<Item = (OwnedObjectPath, Interfaces)>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

/// Fetches the managed object graph from BlueZ with a single `GetManagedObjects` call.
///
/// There is no retry and no partial result.
pub async fn query(session: &Session) -> Result<ManagedObjectGraph> {
    let manager = session.object_manager().await.map_err(Error::query)?;
    let objects = manager.get_managed_objects().await.map_err(Error::query)?;
    log::debug!("GetManagedObjects returned {} objects", objects.len());

    Ok(objects
        .into_iter()
        .map(|(path, intfs)| {
            let intfs = intfs
                .into_iter()
                .map(|(name, props)| (name.to_string(), props))
                .collect();
            (path, intfs)
        })
        .collect())
}
