use crossbeam_channel::{Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Initial capacity of a freshly allocated buffer; one access line fits.
const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Buffers that grew past this are dropped instead of pooled.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Pool of reusable line buffers.
///
/// Backed by a bounded lock-free queue. `acquire` never blocks: a miss
/// allocates a fresh buffer. Release never fails: when the pool is full the
/// buffer is simply dropped.
pub struct BufferPool {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    capacity: usize,
}

impl BufferPool {
    /// Create a pool retaining at most `capacity` idle buffers.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        Self {
            tx,
            rx,
            capacity: capacity.max(1),
        }
    }

    /// Take an empty buffer, returned to the pool when the guard drops.
    #[inline]
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let mut buf = self
            .rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(DEFAULT_BUFFER_CAPACITY));
        buf.clear();
        PooledBuffer { pool: self, buf }
    }

    fn release(&self, buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        // Full pool: the buffer is dropped here.
        let _ = self.tx.try_send(buf);
    }

    /// Idle buffers currently held.
    pub fn available(&self) -> usize {
        self.rx.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers * 4)
    }
}

/// Scoped loan of a pooled buffer.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
