// SPDX-License-Identifier: MPL-2.0
//! Ordered image attachments for the product form.
//!
//! The list owns the display order of the images attached to a product;
//! the record at index 0 is the cover image. Reordering happens through
//! [`AttachmentList::reconcile_move`], which turns one drag-and-drop gesture
//! into a position-preserving relocation. Records are identified by a stable
//! synthetic id assigned at attachment time, so lookups never depend on the
//! (mutable) source path.

use std::path::PathBuf;

/// Stable identity of one attached image, assigned when the file is attached
/// and never reused within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttachmentId(u64);

/// One attached image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: AttachmentId,
    /// Where the image came from (picked file path).
    pub source: PathBuf,
    /// Index of the file within the batch it was attached from; used to map
    /// the record back to the picked files at submit time.
    pub original_index: usize,
    /// Marked records stay in the sequence (and keep their slot in the
    /// ordering) but are hidden and excluded from submission.
    pub marked_for_deletion: bool,
}

/// The drop half of a drag gesture: where the dragged record should land,
/// and which record was seen there when the gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub index: usize,
    pub id: AttachmentId,
}

/// A single drag-and-drop relocation. Transient: consumed once, then gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// The dragged record, by identity (its index may be stale by drop time).
    pub from: AttachmentId,
    pub to: DropTarget,
}

/// Ordered image attachments; index 0 is the cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentList {
    records: Vec<ImageRecord>,
    next_id: u64,
}

impl AttachmentList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with a freshly picked batch of files.
    ///
    /// Attaching is all-or-nothing: the previous records are dropped first,
    /// mirroring a file input whose selection supersedes the old one.
    pub fn replace_with(&mut self, paths: Vec<PathBuf>) {
        self.records.clear();
        for (index, source) in paths.into_iter().enumerate() {
            self.next_id += 1;
            self.records.push(ImageRecord {
                id: AttachmentId(self.next_id),
                source,
                original_index: index,
                marked_for_deletion: false,
            });
        }
    }

    /// Applies one drag-and-drop relocation.
    ///
    /// The record occupying `to.index` must still be the one observed at
    /// drag time; when the list changed in between, the request is silently
    /// ignored. A self-drop or an unknown dragged identity is also a no-op.
    /// The length of the sequence never changes here, only its order.
    pub fn reconcile_move(&mut self, request: MoveRequest) {
        let stale = self
            .records
            .get(request.to.index)
            .map_or(true, |occupant| occupant.id != request.to.id);
        if stale {
            return;
        }

        let Some(from_index) = self.index_of(request.from) else {
            return;
        };
        if from_index == request.to.index {
            return;
        }

        // Splice the dragged record out and back in at the target position.
        // Every record between the two positions shifts by one; the relative
        // order of all other records is untouched.
        let record = self.records.remove(from_index);
        self.records.insert(request.to.index, record);
    }

    /// Marks a record for deletion; it keeps its slot but is hidden.
    pub fn mark_for_deletion(&mut self, id: AttachmentId) {
        if let Some(record) = self.record_mut(id) {
            record.marked_for_deletion = true;
        }
    }

    /// Clears the deletion mark.
    pub fn restore(&mut self, id: AttachmentId) {
        if let Some(record) = self.record_mut(id) {
            record.marked_for_deletion = false;
        }
    }

    /// Removes a record from the sequence entirely.
    pub fn remove(&mut self, id: AttachmentId) {
        self.records.retain(|record| record.id != id);
    }

    /// The cover image: the first record, marked or not.
    #[must_use]
    pub fn cover(&self) -> Option<&ImageRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Records that will be part of the submission, in display order.
    pub fn submission_records(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records
            .iter()
            .filter(|record| !record.marked_for_deletion)
    }

    /// Number of records that count toward the image-count rule.
    #[must_use]
    pub fn submission_len(&self) -> usize {
        self.submission_records().count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn index_of(&self, id: AttachmentId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn record_mut(&mut self, id: AttachmentId) -> Option<&mut ImageRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }
}

/// Tracks the in-flight drag gesture over the attachment list.
///
/// The widget layer records the grabbed identity on drag start; on drop it
/// asks for a [`MoveRequest`] pairing that identity with the observed drop
/// target. Dropping with nothing grabbed yields no request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<AttachmentId>,
}

impl DragState {
    /// Begins a drag gesture from the given record.
    pub fn grab(&mut self, id: AttachmentId) {
        self.source = Some(id);
    }

    /// Abandons the in-flight gesture, if any.
    pub fn cancel(&mut self) {
        self.source = None;
    }

    #[must_use]
    pub fn is_dragging(&self, id: AttachmentId) -> bool {
        self.source == Some(id)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// Completes the gesture over a drop target, consuming the source.
    ///
    /// Dropping a record onto itself produces no request (self-drops are
    /// no-ops anyway, this just skips the bookkeeping).
    pub fn drop_on(&mut self, target: DropTarget) -> Option<MoveRequest> {
        let from = self.source.take()?;
        if from == target.id {
            return None;
        }
        Some(MoveRequest { from, to: target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a list of `n` attachments named a.png, b.png, ...
    fn list_of(n: usize) -> AttachmentList {
        let mut list = AttachmentList::new();
        let names: Vec<PathBuf> = (0..n)
            .map(|i| PathBuf::from(format!("{}.png", (b'a' + i as u8) as char)))
            .collect();
        list.replace_with(names);
        list
    }

    fn order(list: &AttachmentList) -> Vec<String> {
        list.records()
            .iter()
            .map(|record| {
                record
                    .source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn request(list: &AttachmentList, from: usize, to: usize) -> MoveRequest {
        MoveRequest {
            from: list.records()[from].id,
            to: DropTarget {
                index: to,
                id: list.records()[to].id,
            },
        }
    }

    #[test]
    fn move_forward_relocates_only_the_dragged_record() {
        // [a,b,c,d]: drag a (index 0) onto c (index 2) -> [b,c,a,d]
        let mut list = list_of(4);
        let req = request(&list, 0, 2);
        list.reconcile_move(req);
        assert_eq!(order(&list), ["b", "c", "a", "d"]);
    }

    #[test]
    fn move_backward_relocates_only_the_dragged_record() {
        // [a,b,c,d]: drag d (index 3) onto b (index 1) -> [a,d,b,c]
        let mut list = list_of(4);
        let req = request(&list, 3, 1);
        list.reconcile_move(req);
        assert_eq!(order(&list), ["a", "d", "b", "c"]);
    }

    #[test]
    fn self_drop_is_identity() {
        let mut list = list_of(2);
        let req = request(&list, 0, 0);
        list.reconcile_move(req);
        assert_eq!(order(&list), ["a", "b"]);
    }

    #[test]
    fn stale_drop_target_is_ignored() {
        let mut list = list_of(4);
        let mut req = request(&list, 0, 2);
        // The list changes between drag start and drop: the record observed
        // at index 2 no longer sits there.
        req.to.id = list.records()[3].id;
        list.reconcile_move(req);
        assert_eq!(order(&list), ["a", "b", "c", "d"]);
    }

    #[test]
    fn out_of_bounds_target_is_ignored() {
        let mut list = list_of(3);
        let req = MoveRequest {
            from: list.records()[0].id,
            to: DropTarget {
                index: 7,
                id: list.records()[1].id,
            },
        };
        list.reconcile_move(req);
        assert_eq!(order(&list), ["a", "b", "c"]);
    }

    #[test]
    fn unknown_source_is_ignored() {
        let mut list = list_of(4);
        let ghost = list.records()[3].id;
        list.remove(ghost);

        let target = DropTarget {
            index: 1,
            id: list.records()[1].id,
        };
        list.reconcile_move(MoveRequest {
            from: ghost,
            to: target,
        });
        assert_eq!(order(&list), ["a", "b", "c"]);
    }

    #[test]
    fn moves_never_change_length_or_membership() {
        let mut list = list_of(6);
        let before: Vec<AttachmentId> = {
            let mut ids: Vec<_> = list.records().iter().map(|r| r.id).collect();
            ids.sort();
            ids
        };

        for from in 0..6 {
            for to in 0..6 {
                let req = request(&list, from, to);
                list.reconcile_move(req);
                assert_eq!(list.len(), 6);
                let mut after: Vec<_> = list.records().iter().map(|r| r.id).collect();
                after.sort();
                assert_eq!(after, before, "membership changed at {from}->{to}");
            }
        }
    }

    #[test]
    fn move_preserves_relative_order_of_others() {
        let mut list = list_of(5);
        let dragged = list.records()[1].id;
        let req = request(&list, 1, 3);
        list.reconcile_move(req);

        let rest: Vec<String> = list
            .records()
            .iter()
            .filter(|record| record.id != dragged)
            .map(|record| record.source.display().to_string())
            .collect();
        assert_eq!(rest, ["a.png", "c.png", "d.png", "e.png"]);
    }

    #[test]
    fn moving_into_index_zero_changes_the_cover() {
        let mut list = list_of(4);
        let req = request(&list, 2, 0);
        list.reconcile_move(req);
        assert_eq!(
            list.cover().map(|r| r.source.clone()),
            Some(PathBuf::from("c.png"))
        );
    }

    #[test]
    fn replace_with_resets_records_and_assigns_fresh_ids() {
        let mut list = list_of(3);
        let old_ids: Vec<_> = list.records().iter().map(|r| r.id).collect();

        list.replace_with(vec![PathBuf::from("x.png"), PathBuf::from("y.png")]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].original_index, 0);
        assert_eq!(list.records()[1].original_index, 1);
        for record in list.records() {
            assert!(!old_ids.contains(&record.id));
        }
    }

    #[test]
    fn marking_hides_from_submission_but_keeps_the_slot() {
        let mut list = list_of(4);
        let marked = list.records()[1].id;
        list.mark_for_deletion(marked);

        assert_eq!(list.len(), 4);
        assert_eq!(list.submission_len(), 3);
        assert_eq!(order(&list), ["a", "b", "c", "d"]);

        list.restore(marked);
        assert_eq!(list.submission_len(), 4);
    }

    #[test]
    fn remove_drops_the_record_entirely() {
        let mut list = list_of(3);
        let id = list.records()[1].id;
        list.remove(id);
        assert_eq!(order(&list), ["a", "c"]);
    }

    #[test]
    fn marked_records_still_move() {
        // The ordering contract covers every record; a marked record keeps
        // participating until it is actually removed.
        let mut list = list_of(3);
        let marked = list.records()[2].id;
        list.mark_for_deletion(marked);

        let req = request(&list, 2, 0);
        list.reconcile_move(req);
        assert_eq!(order(&list), ["c", "a", "b"]);
    }

    #[test]
    fn drag_state_builds_request_from_grab_and_drop() {
        let list = list_of(3);
        let mut drag = DragState::default();
        drag.grab(list.records()[2].id);
        assert!(drag.is_dragging(list.records()[2].id));

        let target = DropTarget {
            index: 0,
            id: list.records()[0].id,
        };
        let req = drag.drop_on(target).expect("request built");
        assert_eq!(req.from, list.records()[2].id);
        assert_eq!(req.to, target);
        assert!(!drag.is_active());
    }

    #[test]
    fn drag_state_ignores_drop_without_grab_and_self_drop() {
        let list = list_of(2);
        let mut drag = DragState::default();
        let target = DropTarget {
            index: 0,
            id: list.records()[0].id,
        };
        assert!(drag.drop_on(target).is_none());

        drag.grab(list.records()[0].id);
        assert!(drag.drop_on(target).is_none());
        assert!(!drag.is_active());
    }
}
