//! Room/category registry loading.

use std::path::Path;

use serde::Deserialize;
use themelion_model::{Category, Room, TopicStatus};
use tracing::debug;

use crate::discovery::list_files_with_extension;
use crate::error::{ContentError, Result};

#[derive(Debug, Deserialize)]
struct RoomDescriptor {
    room: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    categories: Vec<Category>,
}

impl RoomDescriptor {
    /// Every summary starts out planned, whatever the file says.
    fn into_room(self) -> Room {
        let categories = self
            .categories
            .into_iter()
            .map(|category| Category {
                topics: category
                    .topics
                    .into_iter()
                    .map(|topic| topic.with_status(TopicStatus::Planned))
                    .collect(),
                ..category
            })
            .collect();
        Room {
            slug: self.room,
            name: self.name,
            description: self.description,
            icon: self.icon,
            order: self.order,
            categories,
        }
    }
}

/// Loads every `*.yaml` room descriptor directly inside `dir`.
///
/// Rooms come back sorted ascending by `order`; ties keep file-path order.
pub fn load_rooms(dir: &Path) -> Result<Vec<Room>> {
    let mut rooms = Vec::new();
    for path in list_files_with_extension(dir, "yaml")? {
        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        let descriptor: RoomDescriptor =
            serde_yaml::from_str(&raw).map_err(|e| ContentError::yaml(&path, e))?;
        let room = descriptor.into_room();
        debug!(
            room = %room.slug,
            category_count = room.categories.len(),
            source_filename = %path.display(),
            "loaded room"
        );
        rooms.push(room);
    }
    rooms.sort_by_key(|room| room.order);
    Ok(rooms)
}
