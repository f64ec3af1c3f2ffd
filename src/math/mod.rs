mod random;
mod transform;

pub use random::{gaussian, spread};
pub use transform::{
    deg_to_rad, inverse_transpose, look_at, map_range, normalize, perspective, translate,
    x_rotate, y_rotate, z_rotate,
};
