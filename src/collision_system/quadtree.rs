use crate::geo::*;

pub const MAX_OBJECTS: usize = 10;
pub const MAX_LEVELS: u32 = 5;

/// 1 | 0
/// --+--
/// 2 | 3
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Quadrant {
    TopRight = 0,
    TopLeft = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

struct Node<T> {
    bounds: AABB,
    level: u32,
    // index of the first of four consecutive children in the arena
    children: Option<usize>,
    objects: Vec<T>,
}

impl<T> Node<T> {
    fn new(bounds: AABB, level: u32) -> Node<T> {
        Node {
            bounds,
            level,
            children: None,
            objects: Vec::new(),
        }
    }

    /// which child `aabb` fits in completely, None if it straddles a midline
    fn get_index(&self, aabb: &AABB) -> Option<Quadrant> {
        let vertical_midpoint = self.bounds.origin.x + self.bounds.width * 0.5;
        let horizontal_midpoint = self.bounds.origin.y + self.bounds.height * 0.5;

        let top = aabb.top() < horizontal_midpoint && aabb.bottom() < horizontal_midpoint;
        let bottom = aabb.top() > horizontal_midpoint;

        if aabb.left() < vertical_midpoint && aabb.right() < vertical_midpoint {
            if top {
                Some(Quadrant::TopLeft)
            } else if bottom {
                Some(Quadrant::BottomLeft)
            } else {
                None
            }
        } else if aabb.left() > vertical_midpoint {
            if top {
                Some(Quadrant::TopRight)
            } else if bottom {
                Some(Quadrant::BottomRight)
            } else {
                None
            }
        } else {
            None
        }
    }

    fn quarter(&self, quadrant: Quadrant) -> AABB {
        let (left_width, right_width) = split_length(self.bounds.width);
        let (top_height, bottom_height) = split_length(self.bounds.height);
        let x = self.bounds.origin.x;
        let y = self.bounds.origin.y;
        match quadrant {
            Quadrant::TopRight => AABB::from_xywh(x + left_width, y, right_width, top_height),
            Quadrant::TopLeft => AABB::from_xywh(x, y, left_width, top_height),
            Quadrant::BottomLeft => AABB::from_xywh(x, y + top_height, left_width, bottom_height),
            Quadrant::BottomRight => AABB::from_xywh(
                x + left_width,
                y + top_height,
                right_width,
                bottom_height,
            ),
        }
    }
}

/// region quadtree, rebuilt every frame. objects straddling a midline stay
/// in the node they straddle.
/// the nodes live in an arena that survives `clear`,
/// so a tree rebuilt every frame stops allocating once it has warmed up
pub struct QuadTree<T> {
    nodes: Vec<Node<T>>,
    // nodes[..in_use] belong to the current tree
    in_use: usize,
    max_objects: usize,
    max_levels: u32,
}

impl<T: HasAabb + Copy> QuadTree<T> {
    pub fn new(bounds: AABB) -> QuadTree<T> {
        QuadTree::with_limits(bounds, MAX_OBJECTS, MAX_LEVELS)
    }

    pub fn with_limits(bounds: AABB, max_objects: usize, max_levels: u32) -> QuadTree<T> {
        assert!(bounds.is_valid(), "invalid quadtree bounds {:?}", bounds);
        QuadTree {
            nodes: vec![Node::new(bounds, 0)],
            in_use: 1,
            max_objects,
            max_levels,
        }
    }

    pub fn bounds(&self) -> AABB {
        self.nodes[0].bounds
    }

    /// empties the tree and moves it to new bounds
    pub fn reset(&mut self, bounds: AABB) {
        assert!(bounds.is_valid(), "invalid quadtree bounds {:?}", bounds);
        self.clear();
        self.nodes[0].bounds = bounds;
    }

    /// removes all objects and children, the root becomes a leaf again
    pub fn clear(&mut self) {
        for node in self.nodes[..self.in_use].iter_mut() {
            node.objects.clear();
            node.children = None;
        }
        self.in_use = 1;
    }

    pub fn insert(&mut self, object: T) {
        let aabb = object.get_aabb();
        assert!(aabb.is_valid(), "inserting malformed geometry {:?}", aabb);
        self.insert_at(0, object);
    }

    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, objects: I) {
        for object in objects {
            self.insert(object);
        }
    }

    fn insert_at(&mut self, node: usize, object: T) {
        if let Some(first_child) = self.nodes[node].children {
            // only add the object to a child if it fits completely within one
            if let Some(quadrant) = self.nodes[node].get_index(&object.get_aabb()) {
                self.insert_at(first_child + quadrant.index(), object);
                return;
            }
        }

        self.nodes[node].objects.push(object);

        if self.nodes[node].objects.len() > self.max_objects
            && self.nodes[node].level < self.max_levels
        {
            let first_child = match self.nodes[node].children {
                Some(first_child) => first_child,
                None => self.split(node),
            };

            let mut objects = std::mem::take(&mut self.nodes[node].objects);
            let mut i = 0;
            while i < objects.len() {
                match self.nodes[node].get_index(&objects[i].get_aabb()) {
                    Some(quadrant) => {
                        let moved = objects.remove(i);
                        self.insert_at(first_child + quadrant.index(), moved);
                    }
                    None => i += 1,
                }
            }
            self.nodes[node].objects = objects;
        }
    }

    /// creates the four children of `node`, returns the index of the first one
    fn split(&mut self, node: usize) -> usize {
        let first_child = self.in_use;
        let level = self.nodes[node].level + 1;
        for quadrant in Quadrant::ALL.iter() {
            let bounds = self.nodes[node].quarter(*quadrant);
            let index = first_child + quadrant.index();
            if index < self.nodes.len() {
                // reuse a node from an earlier frame, its objects are already cleared
                let reused = &mut self.nodes[index];
                reused.bounds = bounds;
                reused.level = level;
                reused.children = None;
            } else {
                self.nodes.push(Node::new(bounds, level));
            }
        }
        self.in_use += 4;
        self.nodes[node].children = Some(first_child);
        log::debug!(
            "split quadtree node at level {} ({:?})",
            level - 1,
            self.nodes[node].bounds
        );
        first_child
    }

    /// everything `object` could collide with: the objects along its path down the tree
    pub fn query_candidates(&self, object: &T, out: &mut Vec<T>) {
        let aabb = object.get_aabb();
        assert!(aabb.is_valid(), "querying malformed geometry {:?}", aabb);
        let mut node = 0;
        loop {
            let current = &self.nodes[node];
            out.extend_from_slice(&current.objects);
            match (current.get_index(&aabb), current.children) {
                (Some(quadrant), Some(first_child)) => node = first_child + quadrant.index(),
                _ => break,
            }
        }
    }

    pub fn candidates(&self, object: &T) -> Vec<T> {
        let mut out = Vec::new();
        self.query_candidates(object, &mut out);
        out
    }

    /// appends every stored object
    pub fn collect_all(&self, out: &mut Vec<T>) {
        self.collect_from(0, out);
    }

    fn collect_from(&self, node: usize, out: &mut Vec<T>) {
        if let Some(first_child) = self.nodes[node].children {
            for quadrant in Quadrant::ALL.iter() {
                self.collect_from(first_child + quadrant.index(), out);
            }
        }
        out.extend_from_slice(&self.nodes[node].objects);
    }

    pub fn all_objects(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_all(&mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.nodes[..self.in_use]
            .iter()
            .map(|node| node.objects.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// number of nodes in the current tree, the root included
    pub fn node_count(&self) -> usize {
        self.in_use
    }

    pub fn depth(&self) -> u32 {
        self.nodes[..self.in_use]
            .iter()
            .map(|node| node.level)
            .max()
            .unwrap_or(0)
    }

    /// (level, bounds, object count) of every node in depth first order
    pub fn layout(&self) -> Vec<(u32, AABB, usize)> {
        let mut out = Vec::with_capacity(self.in_use);
        self.layout_from(0, &mut out);
        out
    }

    fn layout_from(&self, node: usize, out: &mut Vec<(u32, AABB, usize)>) {
        let current = &self.nodes[node];
        out.push((current.level, current.bounds, current.objects.len()));
        if let Some(first_child) = current.children {
            for quadrant in Quadrant::ALL.iter() {
                self.layout_from(first_child + quadrant.index(), out);
            }
        }
    }
}
