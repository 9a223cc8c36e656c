//! Header and footer decoration for list adapters.
//!
//! `HeaderFooterAdapter` wraps a source adapter and shows fixed header views
//! before its items and fixed footer views after them.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bookend_core::logging::targets;
use bookend_core::{AdapterObservable, AdapterObserver, ObserverId, ObserverResult};
use parking_lot::{Mutex, RwLock};
use slotmap::SecondaryMap;

use super::error::{AdapterError, AdapterResult};
use super::mapping::{FixedKind, PositionMap, Slot, ViewTypeBands};
use super::registry::FixedItemRegistry;
use super::traits::{FixedView, LayoutKind, LayoutParams, ListAdapter, ListHost, ViewType, Visibility};
use crate::config::AdapterConfig;

/// A view holder created by a [`HeaderFooterAdapter`].
///
/// Headers and footers reuse the view supplied when they were added; wrapped
/// items carry whatever holder the wrapped adapter created.
pub enum ViewHolder<V: ?Sized, H> {
    /// A header or footer view.
    Fixed(Arc<V>),
    /// A holder created by the wrapped adapter.
    Item(H),
}

impl<V: ?Sized, H> ViewHolder<V, H> {
    /// Returns `true` for header and footer holders.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Returns the header or footer view.
    pub fn fixed_view(&self) -> Option<&Arc<V>> {
        match self {
            Self::Fixed(view) => Some(view),
            Self::Item(_) => None,
        }
    }

    /// Returns the wrapped adapter's holder.
    pub fn as_item(&self) -> Option<&H> {
        match self {
            Self::Item(holder) => Some(holder),
            Self::Fixed(_) => None,
        }
    }

    /// Returns the wrapped adapter's holder mutably.
    pub fn as_item_mut(&mut self) -> Option<&mut H> {
        match self {
            Self::Item(holder) => Some(holder),
            Self::Fixed(_) => None,
        }
    }

    /// Unwraps the wrapped adapter's holder.
    pub fn into_item(self) -> Option<H> {
        match self {
            Self::Item(holder) => Some(holder),
            Self::Fixed(_) => None,
        }
    }
}

impl<V: ?Sized, H: fmt::Debug> fmt::Debug for ViewHolder<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(view) => f
                .debug_tuple("Fixed")
                .field(&Arc::as_ptr(view).cast::<()>())
                .finish(),
            Self::Item(holder) => f.debug_tuple("Item").field(holder).finish(),
        }
    }
}

/// An adapter that adds fixed header and footer views around another adapter.
///
/// Public positions run through the headers, then the wrapped adapter's items,
/// then the footers. Headers and footers are answered from this adapter;
/// everything else is forwarded to the wrapped adapter with the header count
/// subtracted from the position.
///
/// Headers and footers carry view types from the reserved bands of
/// [`ViewTypeBands`]. The header at index `i` always reports
/// `header_base + i`; removing a header re-tags the headers after it.
///
/// `HeaderFooterAdapter` implements [`ListAdapter`], so it can be handed to
/// any host that expects one, or wrapped again.
///
/// # Observers
///
/// Observers registered with this adapter are also registered with the
/// wrapped adapter. They receive this adapter's structural changes (headers
/// and footers added or removed) as [`on_changed`](AdapterObserver::on_changed)
/// and the wrapped adapter's own notifications unchanged, in wrapped adapter
/// positions.
///
/// # Example
///
/// ```ignore
/// use bookend::adapter::{HeaderFooterAdapter, ListAdapter, VecAdapter};
///
/// let rows = Arc::new(VecAdapter::new(names, |_| Row::default(), |name, row| row.set(name)));
/// let adapter: HeaderFooterAdapter<_> = HeaderFooterAdapter::new(rows);
///
/// adapter.add_header(search_bar)?;
/// adapter.add_footer(load_more)?;
///
/// // Headers come first
/// assert_eq!(adapter.wrapped_position(1), Some(0));
/// ```
pub struct HeaderFooterAdapter<A: ListAdapter, V: FixedView + ?Sized = dyn FixedView> {
    adapter: Arc<A>,
    bands: ViewTypeBands,
    headers: RwLock<FixedItemRegistry<V>>,
    footers: RwLock<FixedItemRegistry<V>>,
    /// Whether the host uses a staggered multi-track layout.
    staggered: AtomicBool,
    observable: AdapterObservable,
    /// Wrapped adapter registration for each local observer registration.
    forwarded: Mutex<SecondaryMap<ObserverId, ObserverId>>,
    attached_hosts: AtomicUsize,
}

impl<A, V> HeaderFooterAdapter<A, V>
where
    A: ListAdapter,
    V: FixedView + ?Sized,
{
    /// Creates an adapter wrapping `adapter`, with no headers or footers.
    pub fn new(adapter: Arc<A>) -> Self {
        Self::with_bands(adapter, ViewTypeBands::default())
    }

    /// Creates an adapter using the view-type bands from `config`.
    pub fn with_config(adapter: Arc<A>, config: &AdapterConfig) -> AdapterResult<Self> {
        config.validate()?;
        Ok(Self::with_bands(adapter, config.bands()))
    }

    /// Starts a builder for an adapter with initial headers and footers.
    pub fn builder(adapter: Arc<A>) -> HeaderFooterAdapterBuilder<A, V> {
        HeaderFooterAdapterBuilder::new(adapter)
    }

    fn with_bands(adapter: Arc<A>, bands: ViewTypeBands) -> Self {
        Self {
            adapter,
            bands,
            headers: RwLock::new(FixedItemRegistry::new(FixedKind::Header, bands)),
            footers: RwLock::new(FixedItemRegistry::new(FixedKind::Footer, bands)),
            staggered: AtomicBool::new(false),
            observable: AdapterObservable::new(),
            forwarded: Mutex::new(SecondaryMap::new()),
            attached_hosts: AtomicUsize::new(0),
        }
    }

    /// Returns the wrapped adapter.
    pub fn wrapped_adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// Returns the reserved view-type bands.
    pub fn bands(&self) -> ViewTypeBands {
        self.bands
    }

    fn registry(&self, kind: FixedKind) -> &RwLock<FixedItemRegistry<V>> {
        match kind {
            FixedKind::Header => &self.headers,
            FixedKind::Footer => &self.footers,
        }
    }

    // -------------------------------------------------------------------------
    // Headers and footers
    // -------------------------------------------------------------------------

    /// Number of headers.
    pub fn header_count(&self) -> usize {
        self.headers.read().len()
    }

    /// Number of footers.
    pub fn footer_count(&self) -> usize {
        self.footers.read().len()
    }

    /// Appends a header view.
    ///
    /// Fails with [`AdapterError::InvalidArgument`] if `view` is `None`; the
    /// adapter is left unchanged and observers are not notified.
    pub fn add_header(&self, view: impl Into<Option<Arc<V>>>) -> AdapterResult<()> {
        self.add_fixed(FixedKind::Header, view.into())
    }

    /// Appends a footer view.
    ///
    /// Fails with [`AdapterError::InvalidArgument`] if `view` is `None`; the
    /// adapter is left unchanged and observers are not notified.
    pub fn add_footer(&self, view: impl Into<Option<Arc<V>>>) -> AdapterResult<()> {
        self.add_fixed(FixedKind::Footer, view.into())
    }

    /// Removes the first header that is `view`.
    ///
    /// Returns `false`, without notifying observers, if `view` is not a header.
    pub fn remove_header(&self, view: &Arc<V>) -> bool {
        self.remove_fixed(FixedKind::Header, view)
    }

    /// Removes the first footer that is `view`.
    ///
    /// Returns `false`, without notifying observers, if `view` is not a footer.
    pub fn remove_footer(&self, view: &Arc<V>) -> bool {
        self.remove_fixed(FixedKind::Footer, view)
    }

    /// Removes every header. Observers are notified only if there were any.
    pub fn remove_all_headers(&self) {
        self.remove_all_fixed(FixedKind::Header);
    }

    /// Removes every footer. Observers are notified only if there were any.
    pub fn remove_all_footers(&self) {
        self.remove_all_fixed(FixedKind::Footer);
    }

    /// Returns `true` if `view` is a header.
    pub fn contains_header(&self, view: &Arc<V>) -> bool {
        self.headers.read().contains(view)
    }

    /// Returns `true` if `view` is a footer.
    pub fn contains_footer(&self, view: &Arc<V>) -> bool {
        self.footers.read().contains(view)
    }

    /// Shows or hides every header view.
    pub fn set_header_visibility(&self, visible: bool) {
        self.set_fixed_visibility(FixedKind::Header, visible);
    }

    /// Shows or hides every footer view.
    pub fn set_footer_visibility(&self, visible: bool) {
        self.set_fixed_visibility(FixedKind::Footer, visible);
    }

    /// Returns the header views in display order.
    pub fn headers(&self) -> Vec<Arc<V>> {
        self.headers.read().views()
    }

    /// Returns the footer views in display order.
    pub fn footers(&self) -> Vec<Arc<V>> {
        self.footers.read().views()
    }

    fn add_fixed(&self, kind: FixedKind, view: Option<Arc<V>>) -> AdapterResult<()> {
        let view = view.ok_or(AdapterError::InvalidArgument("the view to add must not be None"))?;
        let (view_type, count) = {
            let mut registry = self.registry(kind).write();
            let view_type = registry.push(view)?;
            (view_type, registry.len())
        };
        tracing::debug!(target: targets::ADAPTER, %kind, view_type, count, "fixed view added");
        self.observable.notify_changed();
        Ok(())
    }

    fn remove_fixed(&self, kind: FixedKind, view: &Arc<V>) -> bool {
        let (removed, count) = {
            let mut registry = self.registry(kind).write();
            (registry.remove(view), registry.len())
        };
        if removed {
            tracing::debug!(target: targets::ADAPTER, %kind, count, "fixed view removed");
            self.observable.notify_changed();
        }
        removed
    }

    fn remove_all_fixed(&self, kind: FixedKind) {
        let cleared = self.registry(kind).write().clear();
        if cleared {
            tracing::debug!(target: targets::ADAPTER, %kind, "all fixed views removed");
            self.observable.notify_changed();
        }
    }

    fn set_fixed_visibility(&self, kind: FixedKind, visible: bool) {
        let visibility = Visibility::from_visible(visible);
        // Views may call back into the adapter, so no lock is held here.
        let views = self.registry(kind).read().views();
        for view in &views {
            view.set_visibility(visibility);
        }
        tracing::debug!(target: targets::ADAPTER, %kind, ?visibility, "fixed view visibility set");
        self.observable.notify_changed();
    }

    // -------------------------------------------------------------------------
    // Position and view-type mapping
    // -------------------------------------------------------------------------

    /// Returns the current region sizes.
    ///
    /// The wrapped adapter's count is read on every call.
    pub fn position_map(&self) -> PositionMap {
        let header_count = self.header_count();
        let item_count = self.adapter.item_count();
        let footer_count = self.footer_count();
        PositionMap::new(header_count, item_count, footer_count)
    }

    /// Translates a public position to the wrapped adapter's position.
    ///
    /// Returns `None` for header, footer and out-of-range positions.
    pub fn wrapped_position(&self, position: usize) -> Option<usize> {
        self.position_map().to_wrapped_position(position)
    }

    /// Translates a wrapped adapter position to the public position.
    pub fn public_position(&self, wrapped_position: usize) -> Option<usize> {
        self.position_map().to_public_position(wrapped_position)
    }

    /// Returns the view type at a public position.
    ///
    /// Fails with [`AdapterError::OutOfRange`] if `position >= item_count()`,
    /// and with [`AdapterError::ReservedViewType`] if the wrapped adapter
    /// reports a view type inside a reserved band.
    pub fn view_type_at(&self, position: usize) -> AdapterResult<ViewType> {
        let map = self.position_map();
        let out_of_range = || AdapterError::OutOfRange {
            position,
            count: map.total(),
        };
        match map.resolve(position).ok_or_else(out_of_range)? {
            Slot::Header(index) => self
                .headers
                .read()
                .view_type_at(index)
                .ok_or_else(out_of_range),
            Slot::Footer(index) => self
                .footers
                .read()
                .view_type_at(index)
                .ok_or_else(out_of_range),
            Slot::Item(wrapped) => {
                let view_type = self.adapter.item_view_type(wrapped);
                if self.bands.is_reserved(view_type) {
                    return Err(AdapterError::ReservedViewType(view_type));
                }
                Ok(view_type)
            }
        }
    }

    /// Creates a holder for `view_type`.
    ///
    /// Header and footer types return the view that was added, after giving it
    /// full-width layout params (full span as well under a staggered layout).
    /// Other types are created by the wrapped adapter. Fails with
    /// [`AdapterError::UnknownViewType`] for a reserved type that no current
    /// header or footer carries.
    pub fn try_create_view(&self, view_type: ViewType) -> AdapterResult<ViewHolder<V, A::Holder>> {
        let Some((kind, index)) = self.bands.decode(view_type) else {
            return Ok(ViewHolder::Item(self.adapter.create_view(view_type)));
        };

        let view = self
            .registry(kind)
            .read()
            .view_at(index)
            .cloned()
            .ok_or(AdapterError::UnknownViewType(view_type))?;
        view.set_layout_params(LayoutParams::fixed_item(self.is_staggered()));
        Ok(ViewHolder::Fixed(view))
    }

    /// Binds `holder` to the item at a public position.
    ///
    /// Header and footer positions need no binding. Item positions are
    /// forwarded to the wrapped adapter with the header count subtracted.
    /// Positions outside `0..item_count()` fail with
    /// [`AdapterError::OutOfRange`] and are never forwarded.
    pub fn bind(&self, holder: &mut ViewHolder<V, A::Holder>, position: usize) -> AdapterResult<()> {
        let map = self.position_map();
        match map.resolve(position) {
            None => Err(AdapterError::OutOfRange {
                position,
                count: map.total(),
            }),
            Some(Slot::Header(_) | Slot::Footer(_)) => Ok(()),
            Some(Slot::Item(wrapped)) => match holder {
                ViewHolder::Item(item) => {
                    self.adapter.bind_view(item, wrapped);
                    Ok(())
                }
                ViewHolder::Fixed(_) => Err(AdapterError::HolderMismatch { position }),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Layout adaptation
    // -------------------------------------------------------------------------

    /// Number of grid tracks the item at `position` occupies.
    ///
    /// Headers and footers fill all `span_count` tracks; items take one.
    pub fn span_size(&self, position: usize, span_count: usize) -> usize {
        self.position_map().span_size(position, span_count)
    }

    /// Returns `true` if fixed views are laid out for a staggered grid.
    pub fn is_staggered(&self) -> bool {
        self.staggered.load(Ordering::Acquire)
    }

    /// Adapts to the host's layout.
    ///
    /// - Grid: installs a span-size lookup that gives headers and footers a
    ///   full row and items one track.
    /// - Staggered grid: makes [`try_create_view`](Self::try_create_view)
    ///   mark header and footer views as full span.
    /// - Linear: nothing to adapt.
    ///
    /// The installed lookup holds a weak reference; once the adapter is
    /// dropped it reports one track for every position.
    pub fn adjust_span_size(self: &Arc<Self>, host: &dyn ListHost)
    where
        A: 'static,
        V: 'static,
    {
        let layout = host.layout();
        tracing::debug!(
            target: targets::ADAPTER,
            ?layout,
            span_count = layout.span_count(),
            "adjusting span size"
        );

        self.staggered.store(
            matches!(layout, LayoutKind::StaggeredGrid { .. }),
            Ordering::Release,
        );

        if let LayoutKind::Grid { span_count } = layout {
            let adapter = Arc::downgrade(self);
            host.set_span_size_lookup(Arc::new(move |position| {
                adapter
                    .upgrade()
                    .map_or(1, |adapter| adapter.span_size(position, span_count))
            }));
        }
    }

    /// Number of hosts currently displaying this adapter.
    pub fn attached_host_count(&self) -> usize {
        self.attached_hosts.load(Ordering::Acquire)
    }
}

impl<A, V> ListAdapter for HeaderFooterAdapter<A, V>
where
    A: ListAdapter,
    V: FixedView + ?Sized,
{
    type Holder = ViewHolder<V, A::Holder>;

    fn item_count(&self) -> usize {
        self.position_map().total()
    }

    /// # Panics
    ///
    /// Panics if `position >= item_count()` or the wrapped adapter reports a
    /// reserved view type. Use [`HeaderFooterAdapter::view_type_at`] for a
    /// fallible query.
    fn item_view_type(&self, position: usize) -> ViewType {
        self.view_type_at(position)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    ///
    /// Panics for a reserved view type that no header or footer carries. Use
    /// [`HeaderFooterAdapter::try_create_view`] for a fallible call.
    fn create_view(&self, view_type: ViewType) -> Self::Holder {
        self.try_create_view(view_type)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    ///
    /// Panics if `position >= item_count()` or a header or footer holder is
    /// bound at an item position. Use [`HeaderFooterAdapter::bind`] for a
    /// fallible call.
    fn bind_view(&self, holder: &mut Self::Holder, position: usize) {
        if let Err(err) = self.bind(holder, position) {
            panic!("{err}");
        }
    }

    fn observable(&self) -> &AdapterObservable {
        &self.observable
    }

    fn register_observer(&self, observer: Arc<dyn AdapterObserver>) -> ObserverResult<ObserverId> {
        let id = self.observable.register(Arc::clone(&observer))?;
        match self.adapter.register_observer(observer) {
            Ok(wrapped_id) => {
                self.forwarded.lock().insert(id, wrapped_id);
                Ok(id)
            }
            Err(err) => {
                // Undo the local registration.
                let _ = self.observable.unregister(id);
                Err(err)
            }
        }
    }

    /// Removes the local registration, then the forwarded one.
    ///
    /// Succeeds once the local registration is gone. A failure to unregister
    /// from the wrapped adapter is logged, not returned.
    fn unregister_observer(&self, id: ObserverId) -> ObserverResult<()> {
        self.observable.unregister(id)?;
        let wrapped_id = self.forwarded.lock().remove(id);
        if let Some(wrapped_id) = wrapped_id
            && let Err(err) = self.adapter.unregister_observer(wrapped_id)
        {
            tracing::warn!(target: targets::ADAPTER, %err, "wrapped adapter rejected observer removal");
        }
        Ok(())
    }

    fn on_attached(&self, host: &dyn ListHost) {
        let hosts = self.attached_hosts.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(target: targets::ADAPTER, hosts, "attached to host");
        self.adapter.on_attached(host);
    }

    fn on_detached(&self, host: &dyn ListHost) {
        let _ = self
            .attached_hosts
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        tracing::debug!(target: targets::ADAPTER, hosts = self.attached_host_count(), "detached from host");
        self.adapter.on_detached(host);
    }

    /// Returns `true` if the wrapped adapter has no items.
    ///
    /// Headers and footers do not count: emptiness describes the data.
    fn is_empty(&self) -> bool {
        self.adapter.item_count() == 0
    }
}

/// Builder for a [`HeaderFooterAdapter`] with initial headers and footers.
///
/// Header and footer lists are always kept separate.
///
/// # Example
///
/// ```ignore
/// let adapter = HeaderFooterAdapter::builder(rows)
///     .header(title)
///     .footers([divider, load_more])
///     .config(AdapterConfig::from_toml_file("bookend.toml")?)
///     .build()?;
/// ```
pub struct HeaderFooterAdapterBuilder<A: ListAdapter, V: FixedView + ?Sized = dyn FixedView> {
    adapter: Arc<A>,
    config: AdapterConfig,
    headers: Vec<Arc<V>>,
    footers: Vec<Arc<V>>,
}

impl<A, V> HeaderFooterAdapterBuilder<A, V>
where
    A: ListAdapter,
    V: FixedView + ?Sized,
{
    /// Creates a new builder wrapping `adapter`.
    pub fn new(adapter: Arc<A>) -> Self {
        Self {
            adapter,
            config: AdapterConfig::default(),
            headers: Vec::new(),
            footers: Vec::new(),
        }
    }

    /// Uses the view-type bands from `config`.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a header.
    pub fn header(mut self, view: Arc<V>) -> Self {
        self.headers.push(view);
        self
    }

    /// Adds several headers, in order.
    pub fn headers(mut self, views: impl IntoIterator<Item = Arc<V>>) -> Self {
        self.headers.extend(views);
        self
    }

    /// Adds a footer.
    pub fn footer(mut self, view: Arc<V>) -> Self {
        self.footers.push(view);
        self
    }

    /// Adds several footers, in order.
    pub fn footers(mut self, views: impl IntoIterator<Item = Arc<V>>) -> Self {
        self.footers.extend(views);
        self
    }

    /// Builds the adapter.
    ///
    /// Fails if the configuration is invalid or there are more headers or
    /// footers than a band can tag.
    pub fn build(self) -> AdapterResult<HeaderFooterAdapter<A, V>> {
        let adapter = HeaderFooterAdapter::with_config(self.adapter, &self.config)?;
        {
            let mut headers = adapter.headers.write();
            for view in self.headers {
                headers.push(view)?;
            }
        }
        {
            let mut footers = adapter.footers.write();
            for view in self.footers {
                footers.push(view)?;
            }
        }
        tracing::debug!(
            target: targets::ADAPTER,
            headers = adapter.header_count(),
            footers = adapter.footer_count(),
            "header/footer adapter built"
        );
        Ok(adapter)
    }
}

static_assertions::assert_impl_all!(
    HeaderFooterAdapter<super::vec_adapter::VecAdapter<String, String>>: Send, Sync
);

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl FixedView for Blank {
        fn set_visibility(&self, _visibility: Visibility) {}
        fn set_layout_params(&self, _params: LayoutParams) {}
    }

    #[test]
    fn test_view_holder_accessors() {
        let mut item: ViewHolder<Blank, u32> = ViewHolder::Item(7);
        assert!(!item.is_fixed());
        assert!(item.fixed_view().is_none());
        *item.as_item_mut().unwrap() += 1;
        assert_eq!(item.as_item(), Some(&8));
        assert_eq!(item.into_item(), Some(8));

        let fixed: ViewHolder<Blank, u32> = ViewHolder::Fixed(Arc::new(Blank));
        assert!(fixed.is_fixed());
        assert!(fixed.as_item().is_none());
        assert_eq!(format!("{fixed:?}").split('(').next(), Some("Fixed"));
    }
}
