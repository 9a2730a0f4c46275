mod image;
mod recording;
