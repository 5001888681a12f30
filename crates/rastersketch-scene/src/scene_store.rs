//! Ordered storage for scene objects.

use crate::model::{NewObject, ObjectId, SceneObject};

/// Deep copy of the store taken before a clip, including selection flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    objects: Vec<SceneObject>,
}

impl SceneSnapshot {
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Insertion-ordered collection of scene objects.
///
/// Ids are allocated monotonically and never reused, not even after
/// [`clear`](Self::clear) or [`restore`](Self::restore).
#[derive(Debug, Clone)]
pub struct SceneStore {
    objects: Vec<SceneObject>,
    next_id: ObjectId,
}

impl SceneStore {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends an object and returns its id.
    pub fn add(&mut self, object: NewObject) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;

        if object.pixels.is_none() {
            tracing::warn!(
                "Object {} ({}) added without pixels, using an empty placeholder",
                id,
                object.kind
            );
        }

        self.objects.push(SceneObject::new(id, object));
        id
    }

    /// Removes every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            objects: self.objects.clone(),
        }
    }

    /// Replaces the contents with a snapshot. The id counter keeps counting.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.objects = snapshot.objects;
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
