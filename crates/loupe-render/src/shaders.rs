// ── Magnifier shaders ───────────────────────────────────────────────
//
// One program, one pass, straight to the surface. The vertex stage crops
// toward the frame center before the source transform; the fragment stage
// runs filter → contrast/brightness → optional unsharp mask. The CPU
// reference in `color.rs` must stay in lockstep with these formulas.

pub const MAGNIFY_VERTEX: &str = r#"#version 330 core

layout(location = 0) in vec2 a_pos;
layout(location = 1) in vec2 a_uv;

uniform mat4 u_tex_matrix;
uniform float u_zoom;

out vec2 v_uv;

void main() {
    gl_Position = vec4(a_pos, 0.0, 1.0);
    vec2 zoomed = (a_uv - 0.5) / u_zoom + 0.5;
    v_uv = (u_tex_matrix * vec4(zoomed, 0.0, 1.0)).xy;
}
"#;

pub const MAGNIFY_FRAGMENT: &str = r#"#version 330 core

in vec2 v_uv;

uniform sampler2D u_frame;
uniform int u_filter_mode;   // 0 = normal, 1 = amber, 2 = grayscale
uniform float u_brightness;
uniform float u_contrast;
uniform float u_sharpness;

out vec4 frag_color;

void main() {
    vec4 color = texture(u_frame, v_uv);

    if (u_filter_mode == 1) {
        color = vec4(color.r, color.g * 0.7, 0.0, 1.0);
    } else if (u_filter_mode == 2) {
        float gray = color.r * 0.299 + color.g * 0.587 + color.b * 0.114;
        color = vec4(gray, gray, gray, 1.0);
    }

    color.rgb = (color.rgb - 0.5) * u_contrast + 0.5;
    color.rgb += u_brightness;
    color.rgb = clamp(color.rgb, 0.0, 1.0);

    if (u_sharpness > 0.0) {
        vec3 blurred = texture(u_frame, v_uv + vec2(0.01, 0.0)).rgb * 0.25 +
                       texture(u_frame, v_uv + vec2(-0.01, 0.0)).rgb * 0.25 +
                       texture(u_frame, v_uv + vec2(0.0, 0.01)).rgb * 0.25 +
                       texture(u_frame, v_uv + vec2(0.0, -0.01)).rgb * 0.25;
        color.rgb += (color.rgb - blurred) * u_sharpness;
    }

    frag_color = color;
}
"#;
