use core_types::ElementId;

/// Deferred work a widget hands to the host's timer or frame queue.
///
/// The host gives the task back to the site when it is due; the site offers it to every
/// widget and the owner recognizes it by variant and element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Recompute the header state on the next frame.
    HeaderFrame,
    /// Fade a gallery item in after it has been laid out.
    ShowGalleryItem(ElementId),
    /// Take a faded-out gallery item out of layout.
    HideGalleryItem(ElementId),
    /// Switch the contact form's submit control to its "sent" state.
    MarkFormSent(ElementId),
    /// Reset the contact form and restore its submit control.
    RestoreForm(ElementId),
}
