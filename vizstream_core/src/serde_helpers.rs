// vizstream_core/src/serde_helpers.rs

pub mod vec3_as_array {
    use nalgebra::Vector3;
    use serde::Serializer;

    pub fn serialize<S>(vec: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let arr = [vec.x, vec.y, vec.z];
        serializer.collect_seq(arr.iter())
    }
}

pub mod point3_as_array {
    use nalgebra::Point3;
    use serde::Serializer;

    pub fn serialize<S>(point: &Point3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let arr = [point.x, point.y, point.z];
        serializer.collect_seq(arr.iter())
    }
}

pub mod points_as_flat_array {
    use nalgebra::Point3;
    use serde::Serializer;

    /// Flattens `[p0, p1, ...]` to `[x0, y0, z0, x1, y1, z1, ...]`, the
    /// vertex layout the wire projection uses for polylines.
    pub fn serialize<S>(points: &[Point3<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(points.iter().flat_map(|p| [p.x, p.y, p.z]))
    }
}
