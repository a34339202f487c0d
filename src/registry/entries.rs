//! The table of every API function routed through the dispatch layer.
//!
//! Each line reads `Variant: fn glName(args) -> ret;`. The order is the slot order,
//! appending is fine but existing lines should never be reordered within a process
//! that shares tables with another build.

/// Invokes `$m!` with the complete entry-point table.
macro_rules! for_each_entry_point {
    ($m:ident) => {
        $m! {
            // GL_VERSION_1_0
            CullFace: fn glCullFace(mode: GLenum);
            FrontFace: fn glFrontFace(mode: GLenum);
            Hint: fn glHint(target: GLenum, mode: GLenum);
            LineWidth: fn glLineWidth(width: GLfloat);
            PointSize: fn glPointSize(size: GLfloat);
            PolygonMode: fn glPolygonMode(face: GLenum, mode: GLenum);
            Scissor: fn glScissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei);
            TexParameterf: fn glTexParameterf(target: GLenum, pname: GLenum, param: GLfloat);
            TexParameteri: fn glTexParameteri(target: GLenum, pname: GLenum, param: GLint);
            TexImage2D: fn glTexImage2D(
                target: GLenum,
                level: GLint,
                internalformat: GLint,
                width: GLsizei,
                height: GLsizei,
                border: GLint,
                format: GLenum,
                type_: GLenum,
                pixels: *const c_void
            );
            DrawBuffer: fn glDrawBuffer(buf: GLenum);
            Clear: fn glClear(mask: GLbitfield);
            ClearColor: fn glClearColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
            ClearStencil: fn glClearStencil(s: GLint);
            ClearDepth: fn glClearDepth(depth: GLdouble);
            StencilMask: fn glStencilMask(mask: GLuint);
            ColorMask: fn glColorMask(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean);
            DepthMask: fn glDepthMask(flag: GLboolean);
            Disable: fn glDisable(cap: GLenum);
            Enable: fn glEnable(cap: GLenum);
            Finish: fn glFinish();
            Flush: fn glFlush();
            BlendFunc: fn glBlendFunc(sfactor: GLenum, dfactor: GLenum);
            LogicOp: fn glLogicOp(opcode: GLenum);
            StencilFunc: fn glStencilFunc(func: GLenum, ref_: GLint, mask: GLuint);
            StencilOp: fn glStencilOp(fail: GLenum, zfail: GLenum, zpass: GLenum);
            DepthFunc: fn glDepthFunc(func: GLenum);
            PixelStorei: fn glPixelStorei(pname: GLenum, param: GLint);
            ReadBuffer: fn glReadBuffer(src: GLenum);
            ReadPixels: fn glReadPixels(
                x: GLint,
                y: GLint,
                width: GLsizei,
                height: GLsizei,
                format: GLenum,
                type_: GLenum,
                pixels: *mut c_void
            );
            GetBooleanv: fn glGetBooleanv(pname: GLenum, data: *mut GLboolean);
            GetDoublev: fn glGetDoublev(pname: GLenum, data: *mut GLdouble);
            GetError: fn glGetError() -> GLenum;
            GetFloatv: fn glGetFloatv(pname: GLenum, data: *mut GLfloat);
            GetIntegerv: fn glGetIntegerv(pname: GLenum, data: *mut GLint);
            GetString: fn glGetString(name: GLenum) -> *const GLubyte;
            IsEnabled: fn glIsEnabled(cap: GLenum) -> GLboolean;
            DepthRange: fn glDepthRange(near: GLdouble, far: GLdouble);
            Viewport: fn glViewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei);

            // GL_VERSION_1_1
            DrawArrays: fn glDrawArrays(mode: GLenum, first: GLint, count: GLsizei);
            DrawElements: fn glDrawElements(mode: GLenum, count: GLsizei, type_: GLenum, indices: *const c_void);
            PolygonOffset: fn glPolygonOffset(factor: GLfloat, units: GLfloat);
            CopyTexImage2D: fn glCopyTexImage2D(
                target: GLenum,
                level: GLint,
                internalformat: GLenum,
                x: GLint,
                y: GLint,
                width: GLsizei,
                height: GLsizei,
                border: GLint
            );
            TexSubImage2D: fn glTexSubImage2D(
                target: GLenum,
                level: GLint,
                xoffset: GLint,
                yoffset: GLint,
                width: GLsizei,
                height: GLsizei,
                format: GLenum,
                type_: GLenum,
                pixels: *const c_void
            );
            BindTexture: fn glBindTexture(target: GLenum, texture: GLuint);
            DeleteTextures: fn glDeleteTextures(n: GLsizei, textures: *const GLuint);
            GenTextures: fn glGenTextures(n: GLsizei, textures: *mut GLuint);
            IsTexture: fn glIsTexture(texture: GLuint) -> GLboolean;

            // GL_VERSION_1_2
            DrawRangeElements: fn glDrawRangeElements(
                mode: GLenum,
                start: GLuint,
                end: GLuint,
                count: GLsizei,
                type_: GLenum,
                indices: *const c_void
            );
            TexImage3D: fn glTexImage3D(
                target: GLenum,
                level: GLint,
                internalformat: GLint,
                width: GLsizei,
                height: GLsizei,
                depth: GLsizei,
                border: GLint,
                format: GLenum,
                type_: GLenum,
                pixels: *const c_void
            );

            // GL_VERSION_1_3
            ActiveTexture: fn glActiveTexture(texture: GLenum);
            SampleCoverage: fn glSampleCoverage(value: GLfloat, invert: GLboolean);
            CompressedTexImage2D: fn glCompressedTexImage2D(
                target: GLenum,
                level: GLint,
                internalformat: GLenum,
                width: GLsizei,
                height: GLsizei,
                border: GLint,
                image_size: GLsizei,
                data: *const c_void
            );

            // GL_VERSION_1_4
            BlendFuncSeparate: fn glBlendFuncSeparate(
                sfactor_rgb: GLenum,
                dfactor_rgb: GLenum,
                sfactor_alpha: GLenum,
                dfactor_alpha: GLenum
            );
            BlendColor: fn glBlendColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
            BlendEquation: fn glBlendEquation(mode: GLenum);

            // GL_VERSION_1_5
            GenQueries: fn glGenQueries(n: GLsizei, ids: *mut GLuint);
            DeleteQueries: fn glDeleteQueries(n: GLsizei, ids: *const GLuint);
            BeginQuery: fn glBeginQuery(target: GLenum, id: GLuint);
            EndQuery: fn glEndQuery(target: GLenum);
            GetQueryObjectuiv: fn glGetQueryObjectuiv(id: GLuint, pname: GLenum, params: *mut GLuint);
            BindBuffer: fn glBindBuffer(target: GLenum, buffer: GLuint);
            DeleteBuffers: fn glDeleteBuffers(n: GLsizei, buffers: *const GLuint);
            GenBuffers: fn glGenBuffers(n: GLsizei, buffers: *mut GLuint);
            IsBuffer: fn glIsBuffer(buffer: GLuint) -> GLboolean;
            BufferData: fn glBufferData(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum);
            BufferSubData: fn glBufferSubData(
                target: GLenum,
                offset: GLintptr,
                size: GLsizeiptr,
                data: *const c_void
            );
            MapBuffer: fn glMapBuffer(target: GLenum, access: GLenum) -> *mut c_void;
            UnmapBuffer: fn glUnmapBuffer(target: GLenum) -> GLboolean;

            // GL_VERSION_2_0
            BlendEquationSeparate: fn glBlendEquationSeparate(mode_rgb: GLenum, mode_alpha: GLenum);
            DrawBuffers: fn glDrawBuffers(n: GLsizei, bufs: *const GLenum);
            StencilOpSeparate: fn glStencilOpSeparate(face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
            StencilFuncSeparate: fn glStencilFuncSeparate(face: GLenum, func: GLenum, ref_: GLint, mask: GLuint);
            StencilMaskSeparate: fn glStencilMaskSeparate(face: GLenum, mask: GLuint);
            AttachShader: fn glAttachShader(program: GLuint, shader: GLuint);
            BindAttribLocation: fn glBindAttribLocation(program: GLuint, index: GLuint, name: *const GLchar);
            CompileShader: fn glCompileShader(shader: GLuint);
            CreateProgram: fn glCreateProgram() -> GLuint;
            CreateShader: fn glCreateShader(type_: GLenum) -> GLuint;
            DeleteProgram: fn glDeleteProgram(program: GLuint);
            DeleteShader: fn glDeleteShader(shader: GLuint);
            DetachShader: fn glDetachShader(program: GLuint, shader: GLuint);
            DisableVertexAttribArray: fn glDisableVertexAttribArray(index: GLuint);
            EnableVertexAttribArray: fn glEnableVertexAttribArray(index: GLuint);
            GetAttribLocation: fn glGetAttribLocation(program: GLuint, name: *const GLchar) -> GLint;
            GetProgramiv: fn glGetProgramiv(program: GLuint, pname: GLenum, params: *mut GLint);
            GetProgramInfoLog: fn glGetProgramInfoLog(
                program: GLuint,
                buf_size: GLsizei,
                length: *mut GLsizei,
                info_log: *mut GLchar
            );
            GetShaderiv: fn glGetShaderiv(shader: GLuint, pname: GLenum, params: *mut GLint);
            GetShaderInfoLog: fn glGetShaderInfoLog(
                shader: GLuint,
                buf_size: GLsizei,
                length: *mut GLsizei,
                info_log: *mut GLchar
            );
            GetUniformLocation: fn glGetUniformLocation(program: GLuint, name: *const GLchar) -> GLint;
            IsProgram: fn glIsProgram(program: GLuint) -> GLboolean;
            IsShader: fn glIsShader(shader: GLuint) -> GLboolean;
            LinkProgram: fn glLinkProgram(program: GLuint);
            ShaderSource: fn glShaderSource(
                shader: GLuint,
                count: GLsizei,
                string: *const *const GLchar,
                length: *const GLint
            );
            UseProgram: fn glUseProgram(program: GLuint);
            Uniform1f: fn glUniform1f(location: GLint, v0: GLfloat);
            Uniform2f: fn glUniform2f(location: GLint, v0: GLfloat, v1: GLfloat);
            Uniform3f: fn glUniform3f(location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat);
            Uniform4f: fn glUniform4f(location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat, v3: GLfloat);
            Uniform1i: fn glUniform1i(location: GLint, v0: GLint);
            Uniform1fv: fn glUniform1fv(location: GLint, count: GLsizei, value: *const GLfloat);
            Uniform4fv: fn glUniform4fv(location: GLint, count: GLsizei, value: *const GLfloat);
            UniformMatrix4fv: fn glUniformMatrix4fv(
                location: GLint,
                count: GLsizei,
                transpose: GLboolean,
                value: *const GLfloat
            );
            ValidateProgram: fn glValidateProgram(program: GLuint);
            VertexAttribPointer: fn glVertexAttribPointer(
                index: GLuint,
                size: GLint,
                type_: GLenum,
                normalized: GLboolean,
                stride: GLsizei,
                pointer: *const c_void
            );

            // GL_VERSION_3_0
            GetStringi: fn glGetStringi(name: GLenum, index: GLuint) -> *const GLubyte;
            BindVertexArray: fn glBindVertexArray(array: GLuint);
            DeleteVertexArrays: fn glDeleteVertexArrays(n: GLsizei, arrays: *const GLuint);
            GenVertexArrays: fn glGenVertexArrays(n: GLsizei, arrays: *mut GLuint);
            IsVertexArray: fn glIsVertexArray(array: GLuint) -> GLboolean;
            BindFramebuffer: fn glBindFramebuffer(target: GLenum, framebuffer: GLuint);
            DeleteFramebuffers: fn glDeleteFramebuffers(n: GLsizei, framebuffers: *const GLuint);
            GenFramebuffers: fn glGenFramebuffers(n: GLsizei, framebuffers: *mut GLuint);
            CheckFramebufferStatus: fn glCheckFramebufferStatus(target: GLenum) -> GLenum;
            FramebufferTexture2D: fn glFramebufferTexture2D(
                target: GLenum,
                attachment: GLenum,
                textarget: GLenum,
                texture: GLuint,
                level: GLint
            );
            FramebufferRenderbuffer: fn glFramebufferRenderbuffer(
                target: GLenum,
                attachment: GLenum,
                renderbuffertarget: GLenum,
                renderbuffer: GLuint
            );
            BindRenderbuffer: fn glBindRenderbuffer(target: GLenum, renderbuffer: GLuint);
            DeleteRenderbuffers: fn glDeleteRenderbuffers(n: GLsizei, renderbuffers: *const GLuint);
            GenRenderbuffers: fn glGenRenderbuffers(n: GLsizei, renderbuffers: *mut GLuint);
            RenderbufferStorage: fn glRenderbufferStorage(
                target: GLenum,
                internalformat: GLenum,
                width: GLsizei,
                height: GLsizei
            );
            BlitFramebuffer: fn glBlitFramebuffer(
                src_x0: GLint,
                src_y0: GLint,
                src_x1: GLint,
                src_y1: GLint,
                dst_x0: GLint,
                dst_y0: GLint,
                dst_x1: GLint,
                dst_y1: GLint,
                mask: GLbitfield,
                filter: GLenum
            );
            GenerateMipmap: fn glGenerateMipmap(target: GLenum);
            MapBufferRange: fn glMapBufferRange(
                target: GLenum,
                offset: GLintptr,
                length: GLsizeiptr,
                access: GLbitfield
            ) -> *mut c_void;
            BindBufferBase: fn glBindBufferBase(target: GLenum, index: GLuint, buffer: GLuint);

            // GL_VERSION_3_1
            GetUniformBlockIndex: fn glGetUniformBlockIndex(
                program: GLuint,
                uniform_block_name: *const GLchar
            ) -> GLuint;
            UniformBlockBinding: fn glUniformBlockBinding(
                program: GLuint,
                uniform_block_index: GLuint,
                uniform_block_binding: GLuint
            );
            DrawArraysInstanced: fn glDrawArraysInstanced(
                mode: GLenum,
                first: GLint,
                count: GLsizei,
                instancecount: GLsizei
            );
            DrawElementsInstanced: fn glDrawElementsInstanced(
                mode: GLenum,
                count: GLsizei,
                type_: GLenum,
                indices: *const c_void,
                instancecount: GLsizei
            );

            // GL_VERSION_3_2
            FenceSync: fn glFenceSync(condition: GLenum, flags: GLbitfield) -> GLsync;
            DeleteSync: fn glDeleteSync(sync: GLsync);
            ClientWaitSync: fn glClientWaitSync(sync: GLsync, flags: GLbitfield, timeout: GLuint64) -> GLenum;
            GetInteger64v: fn glGetInteger64v(pname: GLenum, data: *mut GLint64);

            // GL_VERSION_3_3
            VertexAttribDivisor: fn glVertexAttribDivisor(index: GLuint, divisor: GLuint);
            GenSamplers: fn glGenSamplers(count: GLsizei, samplers: *mut GLuint);
            DeleteSamplers: fn glDeleteSamplers(count: GLsizei, samplers: *const GLuint);
            BindSampler: fn glBindSampler(unit: GLuint, sampler: GLuint);
            SamplerParameteri: fn glSamplerParameteri(sampler: GLuint, pname: GLenum, param: GLint);
        }
    };
}
