/// A turn-based automaton on a toroidal grid.
///
/// A driver calls `step` once per tick and then `render` to learn which
/// cells to repaint. `render` reports grid coordinates and a display
/// category; mapping categories to colours and drawing is up to the caller.
pub trait Automaton {
    type Tile: Copy;

    /// Advances exactly one generation.
    fn step(&mut self);

    fn reset(&mut self);

    /// Reports `(x, y, tile)` for every cell that needs drawing.
    fn render<F>(&self, f: F)
    where
        F: FnMut(usize, usize, Self::Tile);

    fn generation(&self) -> u64;

    fn advance(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }
}
