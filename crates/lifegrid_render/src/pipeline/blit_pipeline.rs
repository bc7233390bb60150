//! Frame texture upload and full-screen blit
//!
//! The texture keeps the previous frame between draws, so each frame only
//! the regions the backend marked as changed need to be written.

use crate::DirtyRect;

/// Bytes per RGBA8 texel
const TEXEL_BYTES: u32 = 4;

/// Texture-backed presenter for CPU-rendered frames
pub struct BlitPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    texture: wgpu::Texture,
    texture_size: (u32, u32),
}

impl BlitPipeline {
    /// Create a pipeline with a `width × height` frame texture
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest filtering keeps cell edges sharp when the frame is scaled.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_source = include_str!("../shaders/blit.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            texture,
            texture_size: (width.max(1), height.max(1)),
        }
    }

    /// Frame texture size in texels
    pub fn texture_size(&self) -> (u32, u32) {
        self.texture_size
    }

    /// Upload `rect` out of a full frame image `image_width` texels wide
    pub fn upload_rect(&self, queue: &wgpu::Queue, rect: DirtyRect, image: &[u8], image_width: u32) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.write(
            queue,
            rect,
            image,
            region_offset(rect, image_width),
            image_width * TEXEL_BYTES,
        );
    }

    /// Upload a whole frame of texture-sized RGBA texels
    pub fn upload_frame(&self, queue: &wgpu::Queue, texels: &[[u8; 4]]) {
        let (width, height) = self.texture_size;
        debug_assert_eq!(texels.len(), (width * height) as usize);
        self.upload_rect(
            queue,
            DirtyRect::new(0, 0, width, height),
            bytemuck::cast_slice(texels),
            width,
        );
    }

    /// Write one texel
    pub fn upload_texel(&self, queue: &wgpu::Queue, x: u32, y: u32, rgba: [u8; 4]) {
        self.write(queue, DirtyRect::new(x, y, 1, 1), &rgba, 0, TEXEL_BYTES);
    }

    fn write(
        &self,
        queue: &wgpu::Queue,
        target: DirtyRect,
        data: &[u8],
        offset: wgpu::BufferAddress,
        bytes_per_row: u32,
    ) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: target.x,
                    y: target.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(target.height),
            },
            wgpu::Extent3d {
                width: target.width,
                height: target.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Draw the frame texture over the whole target
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blit Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}

/// Byte offset of `rect`'s top-left texel within a row-major RGBA image
fn region_offset(rect: DirtyRect, image_width: u32) -> wgpu::BufferAddress {
    (rect.y as u64 * image_width as u64 + rect.x as u64) * TEXEL_BYTES as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_offset() {
        assert_eq!(region_offset(DirtyRect::new(0, 0, 4, 4), 10), 0);
        assert_eq!(region_offset(DirtyRect::new(3, 2, 1, 1), 10), (2 * 10 + 3) * 4);
    }
}
