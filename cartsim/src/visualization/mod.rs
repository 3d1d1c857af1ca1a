pub mod cart_vis2d;
