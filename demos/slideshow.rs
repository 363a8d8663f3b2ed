//! Demo: stream frames from a synthetic in-memory MTP device.
//!
//! Usage:
//!   cargo run --example slideshow

use std::collections::HashMap;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use mtpgallery::{
    spawn, AssociationType, GalleryConfig, MtpTransport, ObjectFormat, ObjectHandle, ObjectInfo,
    ProtectionStatus, StorageId,
};

/// Minimal in-memory responder standing in for a real USB binding.
struct DemoCamera {
    children: HashMap<u32, Vec<u32>>,
    infos: HashMap<u32, ObjectInfo>,
    payloads: HashMap<u32, Vec<u8>>,
}

impl DemoCamera {
    fn new() -> Self {
        let mut camera = Self {
            children: HashMap::new(),
            infos: HashMap::new(),
            payloads: HashMap::new(),
        };

        // /DCIM/100DEMO with three photos, one of them oversized.
        camera.folder(0, 10, "DCIM");
        camera.folder(10, 20, "100DEMO");
        camera.photo(20, 100, "IMG_0100.JPG", 640, 480);
        camera.photo(20, 101, "IMG_0101.JPG", 1600, 1200);
        camera.photo(0, 102, "ROOT.JPG", 320, 240);
        camera
    }

    fn folder(&mut self, parent: u32, handle: u32, name: &str) {
        self.children.entry(parent).or_default().push(handle);
        self.infos.insert(
            handle,
            ObjectInfo {
                name: name.to_string(),
                storage: StorageId(1),
                parent: ObjectHandle(parent),
                association_type: AssociationType::GenericFolder,
                format: ObjectFormat::Association,
                protection_status: ProtectionStatus::None,
                image_pix_width: 0,
                image_pix_height: 0,
                compressed_size: 0,
            },
        );
    }

    fn photo(&mut self, parent: u32, handle: u32, name: &str, width: u32, height: u32) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut payload = Vec::new();
        img.write_to(&mut Cursor::new(&mut payload), ImageFormat::Jpeg)
            .expect("JPEG encode");

        self.children.entry(parent).or_default().push(handle);
        self.infos.insert(
            handle,
            ObjectInfo {
                name: name.to_string(),
                storage: StorageId(1),
                parent: ObjectHandle(parent),
                association_type: AssociationType::Undefined,
                format: ObjectFormat::ExifJpeg,
                protection_status: ProtectionStatus::None,
                image_pix_width: width,
                image_pix_height: height,
                compressed_size: payload.len() as u32,
            },
        );
        self.payloads.insert(handle, payload);
    }
}

impl MtpTransport for DemoCamera {
    fn open_session(&mut self) -> mtpgallery::Result<()> {
        Ok(())
    }

    fn storage_ids(&mut self) -> Option<Vec<StorageId>> {
        Some(vec![StorageId(1)])
    }

    fn object_handles(
        &mut self,
        _storage: StorageId,
        _format: Option<ObjectFormat>,
        parent: ObjectHandle,
    ) -> Option<Vec<ObjectHandle>> {
        self.children
            .get(&parent.0)
            .map(|v| v.iter().copied().map(ObjectHandle).collect())
    }

    fn object_info(&mut self, handle: ObjectHandle) -> Option<ObjectInfo> {
        self.infos.get(&handle.0).cloned()
    }

    fn object_data(&mut self, handle: ObjectHandle, _expected_size: u32) -> Option<Vec<u8>> {
        self.payloads.get(&handle.0).cloned()
    }

    fn close_session(&mut self) {
        println!("session closed");
    }
}

#[tokio::main]
async fn main() -> mtpgallery::Result<()> {
    let (handle, mut frames) = spawn(DemoCamera::new(), GalleryConfig::default());

    while let Some(frame) = frames.recv().await {
        println!(
            "frame from {}: {}x{}",
            frame.source, frame.width, frame.height
        );
    }

    let stats = handle.join().await?;
    println!(
        "done: {} frames, {} folders, {} objects seen",
        stats.frames_produced, stats.folders_entered, stats.objects_seen
    );
    Ok(())
}
